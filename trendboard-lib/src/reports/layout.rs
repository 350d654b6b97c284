use super::context::RenderContext;
use super::layouts::{hud, minimal, risograph};
use super::lookup::{LookupError, check_name};
use super::theme::TokenSet;
use core::fmt::{self, Write};
use core::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The registered page layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    #[default]
    Minimal,
    Hud,
    Risograph,
}

impl Layout {
    /// Looks up a layout by name.
    ///
    /// # Errors
    ///
    /// Fails for malformed names and names with no registered layout.
    pub fn resolve(name: &str) -> Result<Self, LookupError> {
        check_name("layout", name)?;

        Self::from_str(name).map_err(|_| LookupError::Unknown {
            kind: "layout",
            name: name.to_string(),
            available: Self::names().map(str::to_string).collect(),
        })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::iter().map(<&'static str>::from)
    }

    #[must_use]
    pub const fn default_tokens(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Minimal => minimal::DEFAULT_TOKENS,
            Self::Hud => hud::DEFAULT_TOKENS,
            Self::Risograph => risograph::DEFAULT_TOKENS,
        }
    }

    #[must_use]
    pub const fn stylesheet(self) -> &'static str {
        match self {
            Self::Minimal => minimal::STYLESHEET,
            Self::Hud => hud::STYLESHEET,
            Self::Risograph => risograph::STYLESHEET,
        }
    }

    /// Renders a complete HTML document.
    #[must_use]
    pub fn render(self, ctx: &RenderContext, tokens: &TokenSet) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = self.write_document(&mut out, ctx, tokens);
        out
    }

    fn write_document<W: Write>(self, writer: &mut W, ctx: &RenderContext, tokens: &TokenSet) -> fmt::Result {
        writeln!(writer, "<!doctype html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\" />")?;
        writeln!(writer, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />")?;
        writeln!(writer, "<title>{}</title>", ctx.escaped_title())?;
        writeln!(writer, "<style>")?;
        tokens.write_root(writer)?;
        writeln!(writer)?;
        writer.write_str(self.stylesheet())?;
        writeln!(writer, "</style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;

        match self {
            Self::Minimal => minimal::write_body(writer, ctx)?,
            Self::Hud => hud::write_body(writer, ctx)?,
            Self::Risograph => risograph::write_body(writer, ctx)?,
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::context::{ChartFragments, HeroValues, TableRow, TableValue};
    use crate::reports::format::{DeltaClass, FormattedDelta};

    fn flat() -> FormattedDelta {
        FormattedDelta {
            text: "-".to_string(),
            class: DeltaClass::Flat,
        }
    }

    fn context() -> RenderContext {
        RenderContext {
            title: "Team <Metrics>".to_string(),
            subtitle: None,
            stamp: "2026-02-05 13:31".to_string(),
            hero: HeroValues {
                coverage: Some(84.5),
                pass_rate: Some(100.0),
                duration_ms: Some(2_500.0),
                code_lines: Some(2978),
                coverage_delta: FormattedDelta {
                    text: "+1.50%".to_string(),
                    class: DeltaClass::Up,
                },
                pass_rate_delta: flat(),
                duration_delta: flat(),
                code_lines_delta: flat(),
            },
            charts: ChartFragments {
                cloc: Some("<div class=\"chart\">cloc</div>".to_string()),
                cloc_missing: None,
                coverage: Some("<div class=\"chart\">coverage</div>".to_string()),
                pass_rate_duration: Some("<div class=\"chart\">pass</div>".to_string()),
                test_categories: Some("<div class=\"chart\">bars</div>".to_string()),
            },
            table: Some(vec![TableRow {
                label: "Total code lines".to_string(),
                value: TableValue::Count(Some(2978)),
                recorded: Some("2026-02-05 13:31".to_string()),
            }]),
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Layout::resolve("hud").unwrap(), Layout::Hud);
        assert_eq!(Layout::resolve("risograph").unwrap(), Layout::Risograph);

        let err = Layout::resolve("neon").unwrap_err();
        assert!(err.to_string().contains("'neon'"));
        assert!(err.to_string().contains("minimal, hud, risograph"));

        assert!(matches!(Layout::resolve("HUD"), Err(LookupError::InvalidName { .. })));
    }

    #[test]
    fn test_names() {
        assert_eq!(Layout::names().collect::<Vec<_>>(), ["minimal", "hud", "risograph"]);
    }

    #[test]
    fn test_every_layout_renders_charts_in_order() {
        for layout in Layout::iter() {
            let tokens = TokenSet::from_pairs(layout.default_tokens());
            let html = layout.render(&context(), &tokens);

            assert!(html.starts_with("<!doctype html>"), "{layout}");
            assert!(html.contains("<title>Team &lt;Metrics&gt;</title>"), "{layout}");
            assert!(!html.contains("<script"), "{layout}");
            assert!(html.contains("2026-02-05 13:31"), "{layout}");
            assert!(html.contains("delta-up"), "{layout}");

            let positions: Vec<usize> = ["cloc", "coverage", "pass", "bars"]
                .iter()
                .map(|name| html.find(&format!("<div class=\"chart\">{name}</div>")).unwrap())
                .collect();
            assert!(positions.is_sorted(), "{layout}: {positions:?}");
        }
    }

    #[test]
    fn test_stylesheets_reference_their_tokens() {
        for layout in Layout::iter() {
            let css = layout.stylesheet();
            assert!(css.contains("var(--bg)"), "{layout}");
            assert!(css.contains("prefers-reduced-motion") || layout == Layout::Minimal, "{layout}");
            assert!(!css.contains("@import"), "{layout}");
        }
    }

    #[test]
    fn test_default_subtitles() {
        let ctx = context();
        let tokens = TokenSet::default();

        assert!(Layout::Minimal.render(&ctx, &tokens).contains("<div class=\"sub\">Generated 2026-02-05 13:31.</div>"));
        assert!(Layout::Hud.render(&ctx, &tokens).contains("<div class=\"sub\">Session recorded: 2026-02-05 13:31</div>"));
        assert!(Layout::Risograph.render(&ctx, &tokens).contains("<div class=\"sub\">Generated 2026-02-05 13:31</div>"));

        let mut custom = context();
        custom.subtitle = Some("Nightly build of 2026-02-05".to_string());
        assert!(Layout::Hud.render(&custom, &tokens).contains("<div class=\"sub\">Nightly build of 2026-02-05</div>"));
    }

    #[test]
    fn test_hud_achievement() {
        let tokens = TokenSet::default();
        assert!(Layout::Hud.render(&context(), &tokens).contains("Code Guardian"));

        let mut low = context();
        low.hero.coverage = Some(42.0);
        assert!(!Layout::Hud.render(&low, &tokens).contains("Code Guardian"));
    }

    #[test]
    fn test_table_can_be_disabled() {
        let mut ctx = context();
        ctx.table = None;

        for layout in Layout::iter() {
            assert!(!layout.render(&ctx, &TokenSet::default()).contains("<table>"), "{layout}");
        }
    }
}
