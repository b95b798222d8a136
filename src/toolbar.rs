use data::{ScaleAxis, ScaleMode, ViewState, ZoomStep};
use iced::widget::{Row, button, container, row, space, text, text_input};
use iced::{Alignment, Element, Length};

use crate::{Message, style};

/// Scale fields, zoom buttons and reset, laid out for the current [`ScaleMode`].
pub fn view(state: &ViewState) -> Element<'_, Message> {
    let controls: Element<'_, Message> = match state.mode() {
        ScaleMode::Shared => scale_controls(state, ScaleAxis::Both),
        ScaleMode::Independent => row![
            scale_controls(state, ScaleAxis::X),
            scale_controls(state, ScaleAxis::Y),
        ]
        .spacing(16)
        .into(),
    };

    container(
        row![
            space::horizontal(),
            controls,
            button(text("Reset")).on_press(Message::Reset),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding(8)
    .width(Length::Fill)
    .style(style::toolbar)
    .into()
}

fn scale_controls(state: &ViewState, axis: ScaleAxis) -> Element<'_, Message> {
    let mut controls = Row::new().spacing(8).align_y(Alignment::Center);

    match axis {
        ScaleAxis::X => controls = controls.push(text("X")),
        ScaleAxis::Y => controls = controls.push(text("Y")),
        ScaleAxis::Both => {}
    }

    controls
        .push(
            text_input("px per unit", state.draft_text(axis))
                .on_input(move |value| Message::ScaleTextChanged(axis, value))
                .width(128),
        )
        .push(button(text("-")).on_press(Message::Zoom(ZoomStep::Out, axis)))
        .push(button(text("+")).on_press(Message::Zoom(ZoomStep::In, axis)))
        .into()
}
