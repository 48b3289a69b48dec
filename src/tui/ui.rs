use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as PathLine};
use ratatui::widgets::{Block, Gauge, Paragraph, Wrap};

use crate::core::state::{Dashboard, PanelView, TrainingView};
use crate::insights::learning_path::{NODE_RADIUS, NodeStatus, PATH_START_X, PATH_WIDTH, PATH_Y, PathProgress};

pub fn draw_ui(frame: &mut Frame, app: &Dashboard) {
    use Constraint::{Length, Min, Ratio};
    let layout = Layout::vertical([Length(1), Min(8), Length(8), Length(3), Length(1)]);
    let [title_area, panels_area, path_area, training_area, help_area] = layout.areas(frame.area());

    let title = format!("learnctl ({}) | {}", app.base_url, app.status_message);
    frame.render_widget(
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );

    let [left, middle, right] =
        Layout::horizontal([Ratio(1, 3), Ratio(1, 3), Ratio(1, 3)]).areas(panels_area);
    draw_panel(frame, left, "AI Performance Prediction", &app.performance);
    draw_panel(frame, middle, "Your Learning Style Profile", &app.learning_style);
    draw_panel(frame, right, "Learning Engagement Insights", &app.engagement);

    draw_path(frame, path_area, &app.path);
    draw_training(frame, training_area, &app.training);

    frame.render_widget(
        Line::from(" r refresh   t train models   q quit").style(Style::default().add_modifier(Modifier::DIM)),
        help_area,
    );
}

fn draw_panel(frame: &mut Frame, area: Rect, title: &str, view: &PanelView) {
    let (lines, style): (Vec<Line>, Style) = match view {
        PanelView::Empty => (vec![Line::from("Press r to load.")], Style::default().add_modifier(Modifier::DIM)),
        PanelView::Loading(busy) => (vec![Line::from(*busy)], Style::default().fg(Color::Yellow)),
        PanelView::Ready(lines) => (
            lines.iter().map(|l| Line::from(l.as_str())).collect(),
            Style::default(),
        ),
        PanelView::Failed(message) => (vec![Line::from(message.as_str())], Style::default().fg(Color::Red)),
    };
    let paragraph = Paragraph::new(lines)
        .style(style)
        .block(Block::bordered().title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn node_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Completed => Color::Green,
        NodeStatus::Current => Color::Blue,
        NodeStatus::Future => Color::Gray,
    }
}

fn draw_path(frame: &mut Frame, area: Rect, progress: &PathProgress) {
    let layout = progress.layout();
    let title = format!("Learning Path | Progress: {} / {}", progress.current, progress.total);
    let canvas = Canvas::default()
        .block(Block::bordered().title(title))
        .x_bounds([0.0, 1000.0])
        .y_bounds([0.0, 150.0])
        .paint(move |ctx| {
            ctx.draw(&PathLine::new(PATH_START_X, PATH_Y, PATH_START_X + PATH_WIDTH, PATH_Y, Color::DarkGray));
            if layout.completed_width > 0.0 {
                ctx.draw(&PathLine::new(
                    PATH_START_X,
                    PATH_Y,
                    PATH_START_X + layout.completed_width,
                    PATH_Y,
                    Color::Green,
                ));
            }
            for node in &layout.nodes {
                ctx.draw(&Circle {
                    x: node.x,
                    y: node.y,
                    radius: NODE_RADIUS,
                    color: node_color(node.status),
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_training(frame: &mut Frame, area: Rect, training: &TrainingView) {
    let title = if training.enabled {
        "Model Training"
    } else {
        "Model Training (busy)"
    };
    let (ratio, label) = match &training.progress {
        Some(p) => ((p.percent() / 100.0).clamp(0.0, 1.0), format!("{} | {}", p.label(), training.status)),
        None => (0.0, training.status.clone()),
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title(title))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}
