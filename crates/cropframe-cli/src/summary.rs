use std::path::Path;

use console::Style;
use cropframe_core::config::WidgetMode;
use cropframe_core::widget::{ImageTransformWidget, WidgetState};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    mode: Style,
    fault: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            mode: Style::new().green(),
            fault: Style::new().bold().red(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_crop_summary(widget: &ImageTransformWidget, input: &Path, output: Option<&Path>) {
    let s = Styles::new();

    eprintln!();
    eprintln!("  {}", s.title.apply_to("Cropframe"));
    eprintln!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    eprintln!();

    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    if let Some(size) = widget.source_size() {
        eprintln!(
            "  {:<14}{}",
            s.label.apply_to("Source"),
            s.value.apply_to(size)
        );
    }
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(widget.viewport())
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Placement"),
        s.value.apply_to(widget.transform())
    );
    eprintln!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.mode.apply_to(widget.mode())
    );

    match widget.mode() {
        WidgetMode::Input => {
            let chars = widget.form_field().map_or(0, |f| f.value.len());
            eprintln!(
                "  {:<14}{} chars",
                s.label.apply_to("Form value"),
                s.value.apply_to(chars)
            );
        }
        WidgetMode::Post { .. } => {
            let status = match widget.state() {
                WidgetState::Submitted => "accepted",
                _ => "not accepted",
            };
            eprintln!(
                "  {:<14}{}",
                s.label.apply_to("Upload"),
                s.value.apply_to(status)
            );
        }
    }

    if let Some(path) = output {
        eprintln!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(path.display())
        );
    }
    if let Some(fault) = widget.fault() {
        eprintln!("  {:<14}{}", s.label.apply_to("Fault"), s.fault.apply_to(fault));
    }
    eprintln!();
}
