//! Format layer creation

/// Build a boxed fmt layer writing to stderr for the given style method
/// (`pretty`, `compact` or `json`).
macro_rules! create_fmt_layer {
    ($style:ident, $display:expr, $ansi:expr) => {{
        let display = $display;
        let layer = tracing_subscriber::fmt::layer()
            .$style()
            .with_writer(std::io::stderr)
            .with_ansi($ansi)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source);
        if display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}
