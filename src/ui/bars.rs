const FILLED: char = '█';
const EMPTY: char = '░';
const KNOB: char = '●';
const TRACK: char = '─';

/// Number of cells a bar of `width` cells fills at `fraction`.
pub fn bar_width(fraction: f64, width: u16) -> u16 {
    if !fraction.is_finite() || width == 0 {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * f64::from(width)).round() as u16
}

/// Progress bar as text, filled from the left.
pub fn progress_line(fraction: f64, width: u16) -> String {
    let filled = bar_width(fraction, width);
    (0..width)
        .map(|i| if i < filled { FILLED } else { EMPTY })
        .collect()
}

/// Slider track with a knob at `fraction`.
pub fn slider_line(fraction: f64, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = bar_width(fraction, width - 1);
    (0..width)
        .map(|i| if i == knob { KNOB } else { TRACK })
        .collect()
}

/// `m:ss` for countdown labels.
pub fn format_seconds(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
