//! HTML rendering of the layout elements and of whole pages.

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::layout::Button;
use crate::layout::ElementKind;
use crate::layout::Heading;
use crate::layout::Section;
use crate::layout::Text;
use crate::layout::View;
use crate::render::OutputStream;
use crate::render::Render;
use crate::render::error::RenderError;
use crate::render::escape;

const PAGE_TEMPLATE: &str = "page";
const LANG: &str = "en";

impl Render for ElementKind {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        match self {
            ElementKind::Section(s) => s.render(output),
            ElementKind::Heading(h) => h.render(output),
            ElementKind::Text(t) => t.render(output),
            ElementKind::Button(b) => b.render(output),
        }
    }
}

/// Renders the body of the page only. Use [render_page] for a full document.
impl Render for View {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        for element in &self.elements {
            element.render(output)?;
        }

        Ok(())
    }
}

impl Render for Section {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        output.write("<div")?;
        write_class(output, &self.class)?;
        output.write(">")?;

        for element in &self.elements {
            element.render(output)?;
        }

        output.write("</div>")
    }
}

impl Render for Heading {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        let level = self.level();

        output.write(&format!("<h{level}"))?;
        write_class(output, &self.class)?;
        output.write(&format!(">{}</h{level}>", escape(&self.text)))
    }
}

impl Render for Text {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        output.write("<p")?;
        write_class(output, &self.class)?;
        output.write(&format!(">{}</p>", escape(&self.text)))
    }
}

impl Render for Button {
    fn render<O>(&self, output: &mut O) -> Result<(), RenderError>
    where
        O: OutputStream,
    {
        output.write(r#"<button type="button""#)?;
        write_class(output, &self.class())?;
        output.write(&format!(">{}</button>", escape(&self.label)))
    }
}

fn write_class<O: OutputStream>(output: &mut O, class: &str) -> Result<(), RenderError> {
    if class.is_empty() {
        return Ok(());
    }

    output.write(&format!(r#" class="{}""#, escape(class)))
}

#[derive(Serialize)]
struct PageContext<'a> {
    lang: &'a str,
    title: &'a str,
    style: &'a str,
    body: &'a str,
}

/// Renders a complete HTML document for the view.
pub fn render_page(view: &View) -> Result<String, RenderError> {
    let mut body = String::new();
    view.render(&mut body)?;

    let mut template = TinyTemplate::new();
    template.add_template(PAGE_TEMPLATE, include_str!("./template/page.html.tt"))?;

    let context = PageContext {
        lang: LANG,
        title: &view.title,
        style: include_str!("./template/style.css"),
        body: &body,
    };

    Ok(template.render(PAGE_TEMPLATE, &context)?)
}

/// Renders a complete HTML document for the view into `output`.
pub fn write_page<O>(view: &View, output: &mut O) -> Result<(), RenderError>
where
    O: OutputStream,
{
    let page = render_page(view)?;
    output.write(&page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ButtonVariant;

    fn render_body<R: Render>(element: &R) -> String {
        let mut output = String::new();
        element.render(&mut output).unwrap();
        output
    }

    #[test]
    fn section_renders_children_in_order() {
        let section = Section::new("box")
            .add(Heading::new(2, "Title"))
            .add(Text::new("body"));

        assert_eq!(
            render_body(&section),
            r#"<div class="box"><h2>Title</h2><p>body</p></div>"#
        );
    }

    #[test]
    fn text_content_is_escaped() {
        let text = Text::new("<script>alert(1)</script>");

        assert_eq!(
            render_body(&text),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn button_has_button_semantics() {
        let html = render_body(&Button::new("Go").with_variant(ButtonVariant::Outline));

        assert!(html.starts_with(r#"<button type="button" class=""#));
        assert!(html.contains("border bg-background"));
        assert!(html.ends_with(">Go</button>"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn page_wraps_body_in_document_shell() {
        let view = View::new("A & B").add(Text::new("hello"));
        let page = render_page(&view).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<html lang="en">"#));
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains("<body><p>hello</p></body>"));
        assert!(page.contains(".min-h-screen"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let view = View::new("same").add(Button::new("again"));

        assert_eq!(render_page(&view).unwrap(), render_page(&view).unwrap());
    }
}
