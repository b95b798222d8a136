mod logger;
mod style;
mod toolbar;
mod widget;

use std::path::PathBuf;

use data::{GraphConfig, Plot, ScaleAxis, ViewState, ZoomStep};
use iced::time::Instant;
use iced::widget::{canvas, column};
use iced::{Element, Length, Subscription, Theme};

use widget::graph::{self, GraphCanvas, zoom::ZoomTransition};

fn main() -> iced::Result {
    if let Err(err) = logger::setup(cfg!(debug_assertions)) {
        eprintln!("Failed to set up logger: {err}");
    }

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from));

    iced::application(
        move || EquationGraph::new(config.clone()),
        EquationGraph::update,
        EquationGraph::view,
    )
    .title(EquationGraph::title)
    .theme(EquationGraph::theme)
    .subscription(EquationGraph::subscription)
    .window_size(iced::Size::new(960.0, 640.0))
    .antialiasing(true)
    .run()
}

fn load_config(path: Option<PathBuf>) -> GraphConfig {
    let Some(path) = path else {
        return GraphConfig::default();
    };

    match GraphConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log::error!(
                "Failed to load config from {}, using defaults: {err}",
                path.display()
            );
            GraphConfig::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Graph(graph::Message),
    Zoom(ZoomStep, ScaleAxis),
    ScaleTextChanged(ScaleAxis, String),
    Reset,
    Tick(Instant),
}

struct EquationGraph {
    config: GraphConfig,
    plot: Plot,
    view: ViewState,
    zoom: ZoomTransition,
    cache: canvas::Cache,
}

impl EquationGraph {
    fn new(config: GraphConfig) -> Self {
        let (config, plot, view) = match (config.plot(), config.view_state()) {
            (Ok(plot), Ok(view)) => (config, plot, view),
            (Err(err), _) | (_, Err(err)) => {
                log::error!("Invalid graph config, using defaults: {err}");
                let config = GraphConfig::default();
                let plot = config.plot().unwrap_or_default();
                let view = config.view_state().unwrap_or_default();
                (config, plot, view)
            }
        };

        log::info!(
            "Plotting {} equations at {:?}",
            plot.entries().len(),
            view.scale()
        );

        Self {
            zoom: ZoomTransition::new(view.scale(), config.zoom_animation),
            config,
            plot,
            view,
            cache: canvas::Cache::new(),
        }
    }

    fn title(&self) -> String {
        String::from("Equation Graph")
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Graph(graph::Message::Dragged(delta)) => {
                self.view.drag(delta);
                self.cache.clear();
            }
            Message::Zoom(step, axis) => {
                if self.view.zoom(step, axis) {
                    self.retarget_zoom();
                }
            }
            Message::ScaleTextChanged(axis, value) => {
                if self.view.edit_scale_text(axis, &value) {
                    self.retarget_zoom();
                }
            }
            Message::Reset => {
                self.view.reset();
                self.retarget_zoom();
                self.cache.clear();
            }
            Message::Tick(now) => {
                if self.zoom.tick(now) {
                    self.cache.clear();
                }
            }
        }
    }

    fn retarget_zoom(&mut self) {
        self.zoom.retarget(self.view.scale(), Instant::now());
        self.cache.clear();
    }

    fn view(&self) -> Element<'_, Message> {
        let graph: Element<'_, graph::Message> = canvas(GraphCanvas {
            cache: &self.cache,
            plot: &self.plot,
            grid: &self.config.grid,
            pan: self.view.pan(),
            scale: self.zoom.current(),
            center_ratio: self.config.center_ratio,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        column![graph.map(Message::Graph), toolbar::view(&self.view)].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.zoom.is_animating() {
            iced::window::frames().map(Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::Scale;
    use iced::Vector;

    fn app(json: &str) -> EquationGraph {
        EquationGraph::new(GraphConfig::from_json(json).unwrap())
    }

    #[test]
    fn drag_moves_pan() {
        let mut app = app("{}");
        app.update(Message::Graph(graph::Message::Dragged(Vector::new(5.0, -3.0))));

        assert_eq!(app.view.pan(), Vector::new(5.0, -3.0));
    }

    #[test]
    fn zoom_without_animation_shows_target_at_once() {
        let mut app = app(r#"{ "zoom_animation": { "enabled": false } }"#);
        app.update(Message::Zoom(ZoomStep::In, ScaleAxis::Both));

        assert_eq!(app.zoom.current(), Scale::uniform(200.0));
        assert!(!app.zoom.is_animating());
    }

    #[test]
    fn zoom_with_animation_eases_towards_target() {
        let mut app = app("{}");
        app.update(Message::Zoom(ZoomStep::Out, ScaleAxis::Both));

        assert!(app.zoom.is_animating());
        assert_eq!(app.zoom.target(), Scale::uniform(50.0));
        assert_eq!(app.view.scale(), Scale::uniform(50.0));
    }

    #[test]
    fn independent_text_edit_targets_one_axis() {
        let mut app = app(
            r#"{ "scale_mode": "independent", "zoom_animation": { "enabled": false } }"#,
        );
        app.update(Message::ScaleTextChanged(ScaleAxis::Y, "25".to_string()));

        assert_eq!(app.zoom.current(), Scale::new(100.0, 25.0));
        assert_eq!(app.view.draft_text(ScaleAxis::Y), "25");
    }

    #[test]
    fn reset_restores_view() {
        let mut app = app(r#"{ "zoom_animation": { "enabled": false } }"#);
        app.update(Message::Graph(graph::Message::Dragged(Vector::new(40.0, 0.0))));
        app.update(Message::ScaleTextChanged(ScaleAxis::Both, "7".to_string()));
        app.update(Message::Reset);

        assert_eq!(app.view.pan(), Vector::new(0.0, 0.0));
        assert_eq!(app.zoom.current(), Scale::uniform(100.0));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = load_config(Some(PathBuf::from("/nonexistent/equation-graph.json")));
        assert_eq!(config, GraphConfig::default());
    }
}
