use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub wedge_even: Srgba<f64>,
    pub wedge_odd: Srgba<f64>,
    pub label: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub pointer_hole: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            wedge_even: Self::lookup_color(
                context,
                "fortuna_wedge_even",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            wedge_odd: Self::lookup_color(
                context,
                "fortuna_wedge_odd",
                Srgba::new(0.62, 0.631, 0.906, 1.0),
                None,
            ),
            label: Self::lookup_color(
                context,
                "fortuna_label",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            rim: Self::lookup_color(
                context,
                "fortuna_rim",
                Srgba::new(0.62, 0.631, 0.906, 1.0),
                None,
            ),
            pointer: Self::lookup_color(
                context,
                "fortuna_pointer",
                Srgba::new(0.851, 0.859, 0.945, 1.0),
                None,
            ),
            pointer_hole: Self::lookup_color(
                context,
                "fortuna_pointer_hole",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Installs the default wheel palette. Themes and user CSS can redefine any of these names.
pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color fortuna_wedge_even #ffffff;
@define-color fortuna_wedge_odd #9ea1e7;
@define-color fortuna_label #ffffff;
@define-color fortuna_rim #9ea1e7;
@define-color fortuna_pointer #d9dbf1;
@define-color fortuna_pointer_hole #000000;

.fortuna-window {
    background-color: #000000;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
