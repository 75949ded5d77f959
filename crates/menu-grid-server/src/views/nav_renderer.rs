use handlebars::{Handlebars, RenderError, TemplateError};
use menu_grid_core::NavigationLayout;
use serde::Serialize;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
</head>
<body>
  <nav class="menu-grid" style="{{layout.containerStyle}}">
{{#each layout.items}}
    <div class="menu-grid-item" data-menu-id="{{menuId}}" data-direction="{{direction}}" style="{{style}}">
      {{#if href}}<a href="{{href}}" target="{{target}}">{{> label}}</a>{{else}}<p>{{> label}}</p>{{/if}}
{{#if subItems}}
      <ul class="menu-grid-sub">
{{#each subItems}}
        <li><a href="{{href}}" target="{{target}}">{{> label}}</a></li>
{{/each}}
      </ul>
{{/if}}
    </div>
{{/each}}
  </nav>
</body>
</html>
"#;

const LABEL_PARTIAL: &str = r#"{{#if icon.left}}<i class="{{icon.className}}"></i> {{/if}}{{label}}{{#if icon.right}} <i class="{{icon.className}}"></i>{{/if}}"#;

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    layout: &'a NavigationLayout,
}

/// HTML page for the public navigation. Every value is HTML-escaped.
pub struct NavRenderer {
    registry: Handlebars<'static>,
}

impl NavRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("label", LABEL_PARTIAL)?;
        registry.register_template_string("navigation", PAGE_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render(&self, title: &str, layout: &NavigationLayout) -> Result<String, RenderError> {
        self.registry
            .render("navigation", &PageContext { title, layout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_grid_core::{GridPlacement, IconPosition, MenuEntry};

    fn layout() -> NavigationLayout {
        let mut home = MenuEntry::new("home");
        home.menu_name = "Home <b>".into();
        home.href = "/home".into();
        home.icon_name = Some("icon-home".into());
        home.icon_position = Some(IconPosition::Left);
        home.grid = Some(GridPlacement::default_for("home", 0, 2, 0));

        let mut more = MenuEntry::new("more");
        more.menu_name = "More".into();
        more.direction = Some("horizontal".into());
        let mut sub = MenuEntry::new("more_docs");
        sub.menu_name = "Docs".into();
        sub.href = "/docs".into();
        sub.target = true;
        more.sub_menu.push(sub);
        let mut grid = GridPlacement::default_for("more", 0, 2, 0);
        grid.x = 1;
        more.grid = Some(grid);

        NavigationLayout::project(&[home, more], 6)
    }

    #[test]
    fn test_render_escapes_and_links() {
        let html = NavRenderer::new().unwrap().render("Menu", &layout()).unwrap();

        assert!(html.contains("<title>Menu</title>"));
        assert!(html.contains("Home &lt;b&gt;"));
        assert!(html.contains(r#"<i class="icon-home"></i> Home"#));
        assert!(html.contains(r#"target="_self""#));
        assert!(html.contains(r#"<p>More</p>"#));
        assert!(html.contains(r#"data-menu-id="home" data-direction="vertical""#));
        assert!(html.contains(r#"data-menu-id="more" data-direction="horizontal""#));
        assert!(html.contains(r#"target="_blank">Docs</a>"#));
    }

    #[test]
    fn test_render_template_areas_are_attribute_safe() {
        let html = NavRenderer::new().unwrap().render("Menu", &layout()).unwrap();
        assert!(html.contains("&quot;home more&quot;"));
    }
}
