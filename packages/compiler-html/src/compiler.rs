use crate::sanitize::{escape_html, sanitize_html, sanitize_url};
use mailcraft_schema::*;
use tracing::{debug, info, instrument};

/// Options for HTML rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a RenderOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Emit `open`, run `body` one level deeper, then emit `close`
    fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) {
        self.add_line(open);
        self.indent();
        body(self);
        self.dedent();
        self.add_line(close);
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render an email document to a standalone HTML page
///
/// Pure and deterministic: equal input always yields byte-identical output.
#[instrument(skip_all, fields(modules = modules.len()))]
pub fn render(modules: &[Module], settings: &EmailSettings, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(settings, &mut ctx);

    ctx.block("<body>", "</body>", |ctx| {
        if !settings.preheader.is_empty() {
            ctx.add_line(&format!(
                "<div class=\"preheader\">{}</div>",
                escape_html(&settings.preheader)
            ));
        }

        ctx.block("<div class=\"container\">", "</div>", |ctx| {
            ctx.block("<div class=\"content\">", "</div>", |ctx| {
                for module in modules {
                    ctx.block("<div class=\"module\">", "</div>", |ctx| {
                        compile_module(module, ctx);
                    });
                }
            });
        });
    });

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    info!(bytes = html.len(), "Rendered email");
    html
}

/// Render a whole state with default options
pub fn render_state(state: &EmailBuilderState) -> String {
    render(&state.modules, &state.settings, &RenderOptions::default())
}

fn compile_head(settings: &EmailSettings, ctx: &mut Context) {
    ctx.block("<head>", "</head>", |ctx| {
        ctx.add_line("<meta charset=\"utf-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        ctx.add_line(&format!("<title>{}</title>", escape_html(&settings.subject)));

        ctx.block("<style>", "</style>", |ctx| {
            ctx.add_line(&format!(
                "body {{ margin: 0; padding: 0; background-color: {}; }}",
                css_value(&settings.background_color)
            ));
            ctx.add_line(&format!(
                ".container {{ width: 100%; max-width: {}px; margin: 0 auto; }}",
                settings.content_width
            ));
            ctx.add_line(".content { padding: 0; }");
            ctx.add_line(".preheader { display: none; max-height: 0; overflow: hidden; opacity: 0; }");
            ctx.add_line(".columns { display: flex; }");
            ctx.add_line(".column { box-sizing: border-box; }");
            ctx.block("@media (max-width: 600px) {", "}", |ctx| {
                ctx.add_line(".container { max-width: 100% !important; }");
                ctx.add_line(".columns { flex-direction: column !important; }");
                ctx.add_line(".column { flex: 1 1 100% !important; max-width: 100% !important; }");
            });
        });
    });
}

fn compile_module(module: &Module, ctx: &mut Context) {
    match module {
        Module::Text(text) => compile_text(text, ctx),
        Module::Image(image) => compile_image(image, ctx),
        Module::Button(button) => compile_button(button, ctx),
        Module::Divider(divider) => compile_divider(divider, ctx),
        Module::Spacer(spacer) => compile_spacer(spacer, ctx),
        Module::ImageText(image_text) => {
            let widths = Layout::equal(image_text.columns.len()).percentages();
            compile_columns(&image_text.columns, &widths, image_text.gap, "transparent", ctx);
        }
        Module::Columns(columns) => {
            let widths = column_widths(columns);
            compile_columns(&columns.columns, &widths, columns.gap, &columns.background_color, ctx);
        }
        Module::Code(code) => {
            ctx.add_line(&format!(
                "<div class=\"code-block\">{}</div>",
                sanitize_html(&code.code)
            ));
        }
        Module::Social(social) => compile_social(social, ctx),
        Module::Unsubscribe(unsubscribe) => compile_unsubscribe(unsubscribe, ctx),
    }
}

fn compile_text(text: &TextModule, ctx: &mut Context) {
    let style = [
        format!("font-size:{}px", text.font_size),
        format!("font-family:{}", text.font_family),
        format!("font-weight:{}", text.font_weight),
        format!("font-style:{}", text.font_style),
        format!("text-decoration:{}", text.text_decoration),
        format!("text-align:{}", text.text_align.as_str()),
        format!("line-height:{}", text.line_height),
        format!("color:{}", text.color),
        format!("background-color:{}", text.background_color),
        format!("padding:{}", text.padding.to_css()),
    ];

    // highlightColor is an editor-only setting and is not exported
    let content = sanitize_html(&text.content);
    ctx.add_line(&format!("<div style=\"{}\">{}</div>", style_attr(&style), content));
}

fn compile_image(image: &ImageModule, ctx: &mut Context) {
    if image.src.trim().is_empty() {
        debug!(module_id = %image.id, "Skipping image without source");
        return;
    }

    let style = [
        format!("width:{}", image.width),
        format!("height:{}", image.height),
        "max-width:100%".to_string(),
        "border:0".to_string(),
        "display:inline-block".to_string(),
    ];

    ctx.add_line(&format!(
        "<p style=\"margin:0;text-align:{}\"><img src=\"{}\" alt=\"{}\" style=\"{}\"></p>",
        image.alignment.as_str(),
        escape_html(image.src.trim()),
        escape_html(&image.alt),
        style_attr(&style)
    ));
}

fn compile_button(button: &ButtonModule, ctx: &mut Context) {
    let label = if button.text.is_empty() {
        "Button"
    } else {
        button.text.as_str()
    };

    let style = [
        "display:inline-block".to_string(),
        format!("background-color:{}", button.background_color),
        format!("color:{}", button.text_color),
        format!("padding:{}", button.padding.to_css()),
        format!("border:{}px solid {}", button.border_width, button.border_color),
        format!("border-radius:{}px", button.border_radius),
        format!("font-family:{}", button.font_family),
        format!("font-weight:{}", button.font_weight),
        format!("font-size:{}px", button.font_size),
        format!("width:{}", button.width),
        format!("height:{}", button.height),
        "text-decoration:none".to_string(),
    ];

    ctx.add_line(&format!(
        "<p style=\"margin:0;text-align:{}\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"{}\">{}</a></p>",
        button.alignment.as_str(),
        escape_html(&sanitize_url(&button.href)),
        style_attr(&style),
        escape_html(label)
    ));
}

fn compile_divider(divider: &DividerModule, ctx: &mut Context) {
    let style = [
        "height:0".to_string(),
        "margin:0".to_string(),
        "border:none".to_string(),
        format!(
            "border-top:{}px {} {}",
            divider.height,
            divider.style.as_str(),
            divider.color
        ),
        format!("background-color:{}", divider.color),
    ];

    ctx.add_line(&format!("<hr style=\"{}\">", style_attr(&style)));
}

fn compile_spacer(spacer: &SpacerModule, ctx: &mut Context) {
    let style = [
        format!("height:{}px", spacer.height),
        format!("background-color:{}", spacer.background_color),
    ];

    ctx.add_line(&format!("<div style=\"{}\"></div>", style_attr(&style)));
}

/// Percentage width of each column of a `columns` module
///
/// Falls back to equal widths when the layout is malformed or disagrees
/// with the number of columns present.
fn column_widths(module: &ColumnsModule) -> Vec<f64> {
    match Layout::parse(&module.layout) {
        Ok(layout) if layout.column_count() == module.columns.len() => layout.percentages(),
        _ => {
            debug!(
                module_id = %module.id,
                layout = %module.layout,
                "Layout unusable for rendering, using equal widths"
            );
            Layout::equal(module.columns.len()).percentages()
        }
    }
}

fn compile_columns(columns: &[Column], widths: &[f64], gap: u32, background: &str, ctx: &mut Context) {
    let open = format!(
        "<div class=\"columns\" style=\"display:flex;gap:{}px;background-color:{}\">",
        gap,
        escape_html(background)
    );

    ctx.block(&open, "</div>", |ctx| {
        for (column, width) in columns.iter().zip(widths) {
            let width = format_percent(*width);
            let open = format!(
                "<div class=\"column\" style=\"flex:0 1 {}%;max-width:{}%\">",
                width, width
            );

            ctx.block(&open, "</div>", |ctx| {
                for module in &column.modules {
                    compile_module(module, ctx);
                }
            });
        }
    });
}

fn compile_social(social: &SocialModule, ctx: &mut Context) {
    let active: Vec<_> = SocialPlatform::ALL
        .iter()
        .filter_map(|&platform| {
            social
                .url_for(platform)
                .filter(|url| !url.trim().is_empty())
                .map(|url| (platform, url))
        })
        .collect();

    if active.is_empty() {
        debug!(module_id = %social.id, "No social links configured");
        return;
    }

    ctx.block(
        "<p class=\"social\" style=\"margin:0;padding:12px 0;text-align:center\">",
        "</p>",
        |ctx| {
            for (platform, url) in active {
                let style = [
                    "display:inline-block".to_string(),
                    "margin:0 4px".to_string(),
                    "padding:6px 10px".to_string(),
                    "border-radius:4px".to_string(),
                    format!("background-color:{}", platform.brand_color()),
                    "color:#ffffff".to_string(),
                    format!("font-family:{}", DEFAULT_FONT_FAMILY),
                    "font-size:12px".to_string(),
                    "text-decoration:none".to_string(),
                ];

                ctx.add_line(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" title=\"{}\" style=\"{}\">{}</a>",
                    escape_html(&sanitize_url(url)),
                    platform.label(),
                    style_attr(&style),
                    platform.label()
                ));
            }
        },
    );
}

fn compile_unsubscribe(unsubscribe: &UnsubscribeModule, ctx: &mut Context) {
    let style = format!(
        "margin:0;padding:12px 0;text-align:center;font-family:{};font-size:12px;color:#666666",
        DEFAULT_FONT_FAMILY
    );
    let label = escape_html(&unsubscribe.label);

    let body = if unsubscribe.href.trim().is_empty() {
        label
    } else {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"color:#666666;text-decoration:underline\">{}</a>",
            escape_html(&sanitize_url(&unsubscribe.href)),
            label
        )
    };

    ctx.add_line(&format!(
        "<p class=\"unsubscribe\" style=\"{}\">{}</p>",
        escape_html(&style),
        body
    ));
}

fn style_attr(declarations: &[String]) -> String {
    escape_html(&declarations.join(";"))
}

/// Value interpolated into the `<style>` block; characters that could close
/// the rule or the element are dropped
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '"'))
        .collect()
}

/// `50.0` → `"50"`, `33.333…` → `"33.3333"`
fn format_percent(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "50");
        assert_eq!(format_percent(100.0), "100");
        assert_eq!(format_percent(100.0 / 3.0), "33.3333");
        assert_eq!(format_percent(12.5), "12.5");
    }

    #[test]
    fn test_css_value_strips_breakout() {
        assert_eq!(css_value("#fff;} body { color: red"), "#fff body  color: red");
        assert_eq!(css_value("</style>"), "/style");
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let options = RenderOptions {
            pretty: false,
            ..Default::default()
        };
        let html = render(&[], &EmailSettings::default(), &options);
        assert!(!html.contains('\n'));
        assert!(html.starts_with("<!DOCTYPE html><html><head>"));
        assert!(html.ends_with("</body></html>"));
    }
}
