use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::app::App;
use crate::system::history::History;

/// One plotted line
struct Series {
    name: &'static str,
    color: Color,
    data: Vec<(f64, f64)>,
}

/// X span of the retained samples, widened so a single point still plots
pub fn x_bounds(history: &History) -> [f64; 2] {
    match history.index_bounds() {
        Some((first, last)) => [first as f64, (last as f64).max(first as f64 + 1.0)],
        None => [0.0, 1.0],
    }
}

/// Zero-based Y span with 10% headroom over the largest value
pub fn y_bounds<'a>(values: impl IntoIterator<Item = &'a f64>) -> [f64; 2] {
    let max = values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    [0.0, (max * 1.1).max(1.0)]
}

/// Chart A: download and upload throughput
pub fn draw_speed_chart(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let title = match app.history.latest() {
        Some(p) => format!(
            " Internet Speed (Mbps)  ↓ {:.2}  ↑ {:.2} ",
            p.download_mbps, p.upload_mbps
        ),
        None => " Internet Speed (Mbps) ".to_string(),
    };
    let series = [
        Series {
            name: "Download",
            color: cs.download,
            data: app.history.series(|p| p.download_mbps),
        },
        Series {
            name: "Upload",
            color: cs.upload,
            data: app.history.series(|p| p.upload_mbps),
        },
    ];
    draw_series_chart(f, app, area, &title, "Mbps", &series);
}

/// Chart B: ping latency and cumulative loss percentage
pub fn draw_ping_chart(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let title = match app.history.latest() {
        Some(p) => format!(
            " Ping & Packet Loss  {:.1} ms  loss {:.1}% ({}/{}) ",
            p.ping_ms,
            p.loss_pct,
            app.history.lost_samples(),
            app.history.total_samples()
        ),
        None => " Ping & Packet Loss ".to_string(),
    };
    let series = [
        Series {
            name: "Ping",
            color: cs.ping,
            data: app.history.series(|p| p.ping_ms),
        },
        Series {
            name: "Loss %",
            color: cs.loss,
            data: app.history.series(|p| p.loss_pct),
        },
    ];
    draw_series_chart(f, app, area, &title, "ms / %", &series);
}

fn draw_series_chart(
    f: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    y_title: &str,
    series: &[Series],
) {
    let cs = &app.color_scheme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(cs.border))
        .style(cs.base())
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(cs.title).add_modifier(Modifier::BOLD),
        ));

    // Nothing to plot yet
    if app.history.is_empty() {
        let hint = if app.is_monitoring() {
            "Waiting for first sample…"
        } else {
            "Press s (or click Start) to begin monitoring"
        };
        let p = Paragraph::new(hint)
            .style(Style::default().fg(cs.status_idle))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(&s.data)
        })
        .collect();

    let x = x_bounds(&app.history);
    let y = y_bounds(series.iter().flat_map(|s| s.data.iter().map(|(_, v)| v)));
    let axis_style = Style::default().fg(cs.axis);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Time (samples)")
                .style(axis_style)
                .bounds(x)
                .labels(vec![
                    Line::from(format!("{}", x[0] as u64)),
                    Line::from(format!("{}", x[1] as u64)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(y_title.to_string())
                .style(axis_style)
                .bounds(y)
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{:.1}", y[1] / 2.0)),
                    Line::from(format!("{:.1}", y[1])),
                ]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sampler::Sample;

    fn push(h: &mut History, down: f64) {
        h.push(&Sample {
            download_mbps: down,
            upload_mbps: 0.0,
            ping_ms: 0.0,
            packet_lost: false,
            tool_unavailable: false,
            timestamp: String::new(),
        });
    }

    #[test]
    fn single_point_gets_a_non_empty_x_span() {
        let mut h = History::new(100);
        push(&mut h, 5.0);
        assert_eq!(x_bounds(&h), [1.0, 2.0]);
    }

    #[test]
    fn x_span_follows_eviction() {
        let mut h = History::new(10);
        for i in 0..15 {
            push(&mut h, i as f64);
        }
        assert_eq!(x_bounds(&h), [6.0, 15.0]);
    }

    #[test]
    fn y_span_has_headroom_and_floor() {
        assert_eq!(y_bounds(&[0.0, 0.0]), [0.0, 1.0]);
        let [lo, hi] = y_bounds(&[10.0, 50.0, f64::NAN]);
        assert_eq!(lo, 0.0);
        assert!((hi - 55.0).abs() < 1e-9);
    }
}
