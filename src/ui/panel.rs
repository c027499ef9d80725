//! Parameter panel widgets.
//!
//! Each widget edits one field of a demo's parameter struct in place. The
//! render loop reads those fields back every frame; nothing here touches the
//! scene.

use egui::{Color32, RichText, Ui};

use crate::assets::LoadState;

/// Slider range for position parameters.
pub const POSITION_RANGE: std::ops::RangeInclusive<f32> = -100.0..=100.0;
/// Slider step for position parameters.
pub const POSITION_STEP: f64 = 0.1;

/// Splits a packed `0xRRGGBB` value into sRGB bytes.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Packs sRGB bytes into `0xRRGGBB`.
#[must_use]
pub fn rgb_to_hex(rgb: [u8; 3]) -> u32 {
    (u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2])
}

/// Snaps `value` to the slider grid and clamps it to [`POSITION_RANGE`].
#[must_use]
pub fn snap_position(value: f32) -> f32 {
    let step = POSITION_STEP as f32;
    ((value / step).round() * step).clamp(*POSITION_RANGE.start(), *POSITION_RANGE.end())
}

/// Labelled color picker over a packed 24-bit color.
pub fn hex_color_edit(ui: &mut Ui, label: &str, hex: &mut u32) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut rgb = hex_to_rgb(*hex);
        let changed = ui.color_edit_button_srgb(&mut rgb).changed();
        if changed {
            *hex = rgb_to_hex(rgb);
        }
        ui.monospace(format!("#{:06x}", *hex & 0x00ff_ffff));
        changed
    })
    .inner
}

/// Position slider over `[-100, 100]` with a `0.1` step.
///
/// Typed-in values are snapped onto the same grid as dragged ones.
pub fn position_slider(ui: &mut Ui, label: &str, value: &mut f32) -> bool {
    let changed = ui
        .add(
            egui::Slider::new(value, POSITION_RANGE)
                .step_by(POSITION_STEP)
                .text(label),
        )
        .changed();
    if changed {
        *value = snap_position(*value);
    }
    changed
}

/// One line describing an asynchronous load; failures are shown in red.
pub fn load_status<T>(ui: &mut Ui, label: &str, state: &LoadState<T>) {
    let text = format!("{label}: {}", state.status());
    match state {
        LoadState::Failed(_) => ui.label(RichText::new(text).color(Color32::LIGHT_RED)),
        LoadState::Pending(_) => ui.weak(text),
        LoadState::Ready(_) => ui.label(text),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_round_trip() {
        assert_eq!(hex_to_rgb(0x12ab_ef), [0x12, 0xab, 0xef]);
        assert_eq!(rgb_to_hex([0xff, 0x00, 0x80]), 0xff_0080);
    }

    #[test]
    fn snapping_clamps_to_slider_range() {
        assert!((snap_position(1.234) - 1.2).abs() < 1e-5);
        assert_eq!(snap_position(250.0), 100.0);
        assert_eq!(snap_position(-250.0), -100.0);
    }

    #[test]
    fn snapping_keeps_grid_values() {
        assert!((snap_position(-37.26) + 37.3).abs() < 1e-4);
        assert!((snap_position(42.0) - 42.0).abs() < 1e-4);
        assert_eq!(snap_position(0.04), 0.0);
    }
}
