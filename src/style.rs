use iced::widget::container;
use iced::{Font, Theme};

pub const LABEL_FONT: Font = Font::MONOSPACE;
pub const LABEL_TEXT_SIZE: f32 = 12.0;

/// Width of one monospace glyph relative to the font size.
const MONO_ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.3;

/// Approximate extent of a grid label drawn with [`LABEL_FONT`].
pub fn label_size(text: &str) -> iced::Size {
    iced::Size::new(
        text.chars().count() as f32 * LABEL_TEXT_SIZE * MONO_ADVANCE,
        LABEL_TEXT_SIZE * LINE_HEIGHT,
    )
}

pub fn toolbar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        text_color: Some(palette.primary.weak.text),
        background: Some(palette.primary.weak.color.into()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_grows_per_glyph() {
        let one = label_size("1");
        let three = label_size("-1.5");

        assert_eq!(three.height, one.height);
        assert!((three.width - 4.0 * one.width).abs() < 1e-4);
        assert_eq!(label_size("").width, 0.0);
    }
}
