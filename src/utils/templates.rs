use anyhow::{Context as _, Result};
use rust_embed::RustEmbed;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/assets/templates/"]
struct Templates;

pub const REVISION_TEMPLATE: &str = "revision.sql.jinja";
pub const CONFIG_TEMPLATE: &str = "tidemark.yaml.jinja";

pub fn render_template(template_name: &str, ctx: &Context) -> Result<String> {
    let file = Templates::get(template_name)
        .ok_or_else(|| anyhow::anyhow!("Failed to find template: {}", template_name))?;

    let template_str =
        std::str::from_utf8(file.data.as_ref()).context("Failed to parse template as UTF-8")?;

    Tera::default()
        .render_str(template_str, ctx)
        .context(format!("Failed to render template '{}'", template_name))
}
