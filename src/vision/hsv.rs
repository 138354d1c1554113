//! BGR → HSV on the 8-bit scale.
//!
//! Hue is halved to fit a byte (0–179), saturation and value span
//! 0–255. Pure green lands at H = 60, pure red at H = 0, pure blue at
//! H = 120.

/// Convert one BGR pixel to `[h, s, v]`.
pub fn bgr_to_hsv(bgr: [u8; 3]) -> [u8; 3] {
    let [b, g, r] = bgr.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let h_deg = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    // 360° wraps to 0 after halving and rounding.
    let h = (h_deg / 2.0).round() as u16 % 180;
    [h as u8, s.round() as u8, v as u8]
}
