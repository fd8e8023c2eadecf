//! Translation of pointer events into mpv input commands.

/// mpv's key name for the primary pointer button.
pub const PRIMARY_BUTTON_KEY: &str = "MOUSE_BTN0";

/// Scale logical event coordinates to hardware pixels. mpv expects integer
/// coordinates, so the scaled values are truncated.
pub fn scale_pointer(x: f64, y: f64, scale_factor: i32) -> (i64, i64) {
    let factor = f64::from(scale_factor);
    ((x * factor) as i64, (y * factor) as i64)
}

/// Map a toolkit button number to the mpv key name it is forwarded as.
/// Only the primary button is mapped; everything else stays unhandled.
pub fn button_key(button: u32) -> Option<&'static str> {
    (button == gtk::gdk::BUTTON_PRIMARY).then_some(PRIMARY_BUTTON_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_coordinates_scale_and_truncate() {
        assert_eq!(scale_pointer(12.7, 3.2, 2), (25, 6));
        assert_eq!(scale_pointer(100.0, 50.5, 1), (100, 50));
        assert_eq!(scale_pointer(0.9, 0.9, 1), (0, 0));
    }

    #[test]
    fn only_the_primary_button_is_mapped() {
        assert_eq!(button_key(gtk::gdk::BUTTON_PRIMARY), Some("MOUSE_BTN0"));
        assert_eq!(button_key(gtk::gdk::BUTTON_MIDDLE), None);
        assert_eq!(button_key(gtk::gdk::BUTTON_SECONDARY), None);
        assert_eq!(button_key(9), None);
    }
}
