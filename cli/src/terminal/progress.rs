use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TEMPLATE: &str = "{spinner:.blue} Probing [{bar:32.green/bright_black}] {pos}/{len} {msg}";

/// Turns a span created with `indicatif.pb_show = true` into a probe progress bar.
pub fn style_probe_bar(span: &Span) {
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        span.pb_set_style(&style.progress_chars("█▆ ").tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]));
    }
}

/// Progress callback for the probe scheduler.
pub fn report_probe_progress(span: Span) -> impl Fn(usize, usize) + Send + Sync + 'static {
    move |completed, total| {
        span.pb_set_length(total as u64);
        span.pb_set_position(completed as u64);
    }
}
