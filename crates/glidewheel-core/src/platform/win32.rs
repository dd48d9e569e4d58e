//! Win32 implementation: window queries, message posting and the
//! `WH_MOUSE_LL` hook thread.

use std::cell::RefCell;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetClassNameW, GetCursorPos, GetForegroundWindow, GetMessageW,
    PostMessageW, PostThreadMessageW, SetWindowsHookExW, UnhookWindowsHookEx, WindowFromPoint,
    HC_ACTION, LLMHF_INJECTED, MSG, MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_MOUSEHWHEEL, WM_MOUSEWHEEL,
    WM_QUIT,
};

use super::{WheelHandler, WindowSystem};
use crate::types::{ScreenPoint, WheelAxis, WheelMessage, WheelVerdict, WindowHandle};
use crate::{Error, Result};

fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut core::ffi::c_void)
}

fn to_handle(hwnd: HWND) -> Option<WindowHandle> {
    if hwnd.0.is_null() {
        None
    } else {
        Some(WindowHandle(hwnd.0 as isize))
    }
}

/// User32-backed [`WindowSystem`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    fn foreground_window(&self) -> Option<WindowHandle> {
        to_handle(unsafe { GetForegroundWindow() })
    }

    fn class_name(&self, window: WindowHandle) -> Result<String> {
        let mut buf = [0u16; 256];
        let len = unsafe { GetClassNameW(to_hwnd(window), &mut buf) };
        if len <= 0 {
            return Err(Error::Platform(format!(
                "GetClassNameW failed for window {:#x}",
                window.0
            )));
        }
        Ok(String::from_utf16_lossy(&buf[..(len as usize).min(buf.len())]))
    }

    fn cursor_position(&self) -> Result<ScreenPoint> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.map_err(|e| Error::Platform(e.to_string()))?;
        Ok(ScreenPoint::new(point.x, point.y))
    }

    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle> {
        to_handle(unsafe { WindowFromPoint(POINT { x: point.x, y: point.y }) })
    }

    fn post_wheel(&self, target: WindowHandle, message: WheelMessage) -> Result<()> {
        let msg = match message.axis {
            WheelAxis::Vertical => WM_MOUSEWHEEL,
            WheelAxis::Horizontal => WM_MOUSEHWHEEL,
        };
        unsafe {
            PostMessageW(
                Some(to_hwnd(target)),
                msg,
                WPARAM(message.wparam()),
                LPARAM(message.lparam()),
            )
        }
        .map_err(|e| Error::Platform(e.to_string()))
    }
}

thread_local! {
    // Low-level hooks are called on the thread that installed them, so the
    // handler lives in that thread's local slot.
    static HOOK_HANDLER: RefCell<Option<Arc<dyn WheelHandler>>> = RefCell::new(None);
}

unsafe extern "system" fn low_level_mouse_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let message = wparam.0 as u32;
        if message == WM_MOUSEWHEEL || message == WM_MOUSEHWHEEL {
            let info = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
            // Events synthesized by other tools pass through untouched
            if info.flags & LLMHF_INJECTED == 0 {
                let delta = ((info.mouseData >> 16) & 0xFFFF) as u16 as i16;
                let axis = if message == WM_MOUSEHWHEEL {
                    WheelAxis::Horizontal
                } else {
                    WheelAxis::Vertical
                };
                let verdict = HOOK_HANDLER
                    .try_with(|slot| {
                        slot.try_borrow()
                            .ok()
                            .and_then(|handler| handler.as_ref().map(|h| h.on_wheel_event(delta, axis)))
                    })
                    .ok()
                    .flatten();
                if verdict == Some(WheelVerdict::Consume) {
                    return LRESULT(1);
                }
            }
        }
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// Installed system-wide wheel hook.
///
/// The hook runs on a dedicated thread that pumps messages until
/// [`MouseHook::uninstall`] posts `WM_QUIT` to it.
pub struct MouseHook {
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl MouseHook {
    /// Spawn the hook thread and register `WH_MOUSE_LL` on it
    pub fn install(handler: Arc<dyn WheelHandler>) -> Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32>>();

        let thread = thread::Builder::new()
            .name("glidewheel-hook".to_string())
            .spawn(move || run_hook_thread(handler, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                info!("Mouse wheel hook installed (thread {})", thread_id);
                Ok(Self {
                    thread_id,
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(Error::Hook("hook thread exited during startup".to_string()))
            }
        }
    }

    /// Remove the hook and stop its thread
    pub fn uninstall(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            .map_err(|e| Error::Hook(format!("failed to stop hook thread: {}", e)))?;
        thread
            .join()
            .map_err(|_| Error::Hook("hook thread panicked".to_string()))?;

        info!("Mouse wheel hook removed");
        Ok(())
    }
}

impl Drop for MouseHook {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("Failed to remove mouse hook: {}", e);
        }
    }
}

fn run_hook_thread(handler: Arc<dyn WheelHandler>, ready_tx: mpsc::Sender<Result<u32>>) {
    HOOK_HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));

    let module: Option<HINSTANCE> = unsafe { GetModuleHandleW(PCWSTR::null()) }
        .ok()
        .map(Into::into);

    let hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(low_level_mouse_proc), module, 0) } {
        Ok(hook) => hook,
        Err(e) => {
            HOOK_HANDLER.with(|slot| slot.borrow_mut().take());
            let _ = ready_tx.send(Err(Error::Hook(format!("SetWindowsHookExW failed: {}", e))));
            return;
        }
    };

    let _ = ready_tx.send(Ok(unsafe { GetCurrentThreadId() }));

    // Low-level hooks are delivered through this thread's message loop
    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 <= 0 {
            break;
        }
    }

    if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
        error!("UnhookWindowsHookEx failed: {}", e);
    }
    HOOK_HANDLER.with(|slot| slot.borrow_mut().take());
    debug!("Hook thread exiting");
}
