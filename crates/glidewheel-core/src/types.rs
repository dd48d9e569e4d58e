//! Small value types shared across the engine

/// Standard delta of one wheel notch
pub const WHEEL_DELTA: f64 = 120.0;

/// Opaque native window handle.
///
/// Stored as an integer so it can be cached and shared across threads; the
/// platform layer converts it back to the native handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Cursor position in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which wheel produced an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WheelAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// What the capture hook should do with the original event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelVerdict {
    /// Hand the event to the next hook unchanged
    PassThrough,
    /// Swallow the event; the engine animates it instead
    Consume,
}

/// Synthetic wheel message ready to be posted to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelMessage {
    pub axis: WheelAxis,
    /// Delta in notch units (120 per notch)
    pub delta: i16,
    pub point: ScreenPoint,
}

impl WheelMessage {
    /// wParam layout: delta in the high word, key state (none) in the low word
    pub fn wparam(&self) -> usize {
        ((self.delta as u16 as u32) << 16) as usize
    }

    /// lParam layout: y in the high word, x in the low word
    pub fn lparam(&self) -> isize {
        let x = self.point.x as i16 as u16 as u32;
        let y = self.point.y as i16 as u16 as u32;
        ((y << 16) | x) as i32 as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wparam_carries_signed_delta() {
        let up = WheelMessage {
            axis: WheelAxis::Vertical,
            delta: 120,
            point: ScreenPoint::default(),
        };
        assert_eq!(up.wparam(), 0x0078_0000);

        let down = WheelMessage { delta: -120, ..up };
        assert_eq!(down.wparam(), 0xFF88_0000);
        assert_eq!((down.wparam() >> 16) as u16 as i16, -120);
    }

    #[test]
    fn test_lparam_packs_coordinates() {
        let msg = WheelMessage {
            axis: WheelAxis::Vertical,
            delta: 1,
            point: ScreenPoint::new(100, 200),
        };
        assert_eq!(msg.lparam(), (200 << 16) | 100);

        // Negative coordinates (monitor left of primary) keep their low word
        let left = WheelMessage {
            point: ScreenPoint::new(-5, 10),
            ..msg
        };
        assert_eq!(left.lparam() as u32 & 0xFFFF, 0xFFFB);
        assert_eq!((left.lparam() as u32 >> 16) & 0xFFFF, 10);
    }
}
