use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Line as Segment},
    },
};

use super::app::App;
use apitree_hierarchy::{Fill, LabelSide, Point, SceneNode, ShapeId};

/// Line segments per connector curve.
const CURVE_SEGMENTS: usize = 16;

const HELP: &str =
    "↑/↓ select  enter toggle  e expand all  c collapse all  r reset  hjkl pan  +/- zoom  q quit";

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    render_diagram(f, chunks[0], app);
    render_footer(f, chunks[1], app);
}

fn render_diagram(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" apitree ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    app.canvas = inner;

    let config = app.view.config().clone();
    let transform = app.scene.transform();
    let links = app.scene.links();
    let nodes = app.scene.nodes();
    let selected = app.selected;
    let cell_width = config.width / inner.width.max(1) as f64;
    // canvas y grows upwards, drawing space grows downwards
    let height = config.height;
    let flip = move |p: Point| (p.x, height - p.y);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, config.width])
        .y_bounds([0.0, config.height])
        .paint(move |ctx| {
            for (_, path) in &links {
                let points: Vec<Point> = path
                    .flatten(CURVE_SEGMENTS)
                    .into_iter()
                    .map(|p| transform.apply(p))
                    .collect();
                for pair in points.windows(2) {
                    let (x1, y1) = flip(pair[0]);
                    let (x2, y2) = flip(pair[1]);
                    ctx.draw(&Segment::new(x1, y1, x2, y2, Color::DarkGray));
                }
            }
            ctx.layer();

            for node in &nodes {
                let color = node_color(node, selected);
                let center = transform.apply(node.style.position);
                let (x, y) = flip(center);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: node.style.radius * transform.scale,
                    color,
                });

                // terminals have no alpha, so labels appear halfway through a fade
                if node.style.label_opacity >= 0.5 {
                    let offset = config.label_offset * transform.scale;
                    let width = node.label.chars().count() as f64 * cell_width;
                    let label_x = match node.label_side {
                        LabelSide::Before => x - offset - width,
                        LabelSide::After => x + offset,
                    };
                    ctx.print(
                        label_x,
                        y,
                        Span::styled(node.label.clone(), Style::default().fg(color)),
                    );
                }
            }
        });

    f.render_widget(canvas, area);
}

fn node_color(node: &SceneNode, selected: Option<ShapeId>) -> Color {
    if Some(node.id) == selected {
        return Color::Yellow;
    }
    if node.exiting {
        return Color::DarkGray;
    }
    match node.style.fill {
        Fill::Collapsed => Color::LightBlue,
        Fill::Plain => Color::White,
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let status = app.status.borrow();
    let lines = vec![
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
        Line::from(status.as_str()),
    ];

    let footer = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(footer, area);
}
