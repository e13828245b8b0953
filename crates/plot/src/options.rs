use seir_model::Compartment;

/// How one compartment is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub label: String,

    /// Line color as `[red, green, blue]`.
    pub color: [u8; 3],

    pub dashed: bool,

    /// Hidden series are left out of the chart entirely.
    pub visible: bool,
}

/// Display options for a [`Chart`](crate::Chart).
///
/// Construct with [`ChartOptions::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// let options = ChartOptions::new()
///     .title("Lockdown scenario")
///     .series_label(Compartment::Infected, "Infectious")
///     .size(800.0, 600.0);
///
/// // Just the infected curve.
/// let infected = ChartOptions::new().only(Compartment::Infected);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub(crate) title: String,
    pub(crate) x_label: String,
    pub(crate) y_label: String,
    pub(crate) series: [SeriesStyle; 4],
    pub(crate) size: [f32; 2],
    pub(crate) line_width: f32,
    pub(crate) legend: bool,
    pub(crate) grid: bool,
}

impl ChartOptions {
    /// Creates options with the default labels, colors, and a 1500×1100 window.
    #[must_use]
    pub fn new() -> Self {
        let style = |compartment: Compartment, color: [u8; 3], dashed: bool| SeriesStyle {
            label: compartment.label().to_owned(),
            color,
            dashed,
            visible: true,
        };

        Self {
            title: "Spread of a pathogen (SEIR model)".to_owned(),
            x_label: "Time (days)".to_owned(),
            y_label: "Population fraction".to_owned(),
            series: [
                style(Compartment::Susceptible, [0x00, 0x00, 0xcc], false),
                style(Compartment::Exposed, [0xff, 0xb0, 0x00], true),
                style(Compartment::Infected, [0xa0, 0x00, 0x60], false),
                style(Compartment::Recovered, [0x00, 0x80, 0x00], true),
            ],
            size: [1500.0, 1100.0],
            line_width: 3.0,
            legend: true,
            grid: true,
        }
    }

    /// Sets the window and chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Sets the legend label of one compartment.
    #[must_use]
    pub fn series_label(mut self, compartment: Compartment, label: impl Into<String>) -> Self {
        self.series[index(compartment)].label = label.into();
        self
    }

    /// Sets the line color of one compartment.
    #[must_use]
    pub fn series_color(mut self, compartment: Compartment, color: [u8; 3]) -> Self {
        self.series[index(compartment)].color = color;
        self
    }

    /// Draws one compartment with a dashed or solid line.
    #[must_use]
    pub fn series_dashed(mut self, compartment: Compartment, dashed: bool) -> Self {
        self.series[index(compartment)].dashed = dashed;
        self
    }

    /// Shows or hides one compartment.
    #[must_use]
    pub fn series_visible(mut self, compartment: Compartment, visible: bool) -> Self {
        self.series[index(compartment)].visible = visible;
        self
    }

    /// Shows `compartment` and hides the other three.
    #[must_use]
    pub fn only(mut self, compartment: Compartment) -> Self {
        for other in Compartment::ALL {
            self.series[index(other)].visible = other == compartment;
        }
        self
    }

    /// Sets the window size in logical pixels.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Shows or hides the legend.
    #[must_use]
    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Shows or hides the background grid.
    #[must_use]
    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn series(&self, compartment: Compartment) -> &SeriesStyle {
        &self.series[index(compartment)]
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn index(compartment: Compartment) -> usize {
    match compartment {
        Compartment::Susceptible => 0,
        Compartment::Exposed => 1,
        Compartment::Infected => 2,
        Compartment::Recovered => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_compartment_names() {
        let options = ChartOptions::default();
        for compartment in Compartment::ALL {
            assert_eq!(options.series(compartment).label, compartment.label());
        }
        assert!(options.series(Compartment::Exposed).dashed);
        assert!(!options.series(Compartment::Infected).dashed);
        assert!(options.series.iter().all(|style| style.visible));
        assert_eq!(options.series(Compartment::Susceptible).color, [0, 0, 0xcc]);
    }

    #[test]
    fn builder_overrides_single_series() {
        let options = ChartOptions::new()
            .series_label(Compartment::Recovered, "Removed")
            .series_color(Compartment::Recovered, [1, 2, 3])
            .series_dashed(Compartment::Recovered, false);

        let style = options.series(Compartment::Recovered);
        assert_eq!(style.label, "Removed");
        assert_eq!(style.color, [1, 2, 3]);
        assert!(!style.dashed);
        assert_eq!(
            options.series(Compartment::Exposed),
            ChartOptions::new().series(Compartment::Exposed)
        );
    }

    #[test]
    fn only_hides_every_other_series() {
        let options = ChartOptions::new().only(Compartment::Infected);
        let visible: Vec<bool> = Compartment::ALL
            .into_iter()
            .map(|compartment| options.series(compartment).visible)
            .collect();
        assert_eq!(visible, [false, false, true, false]);

        let options = options.series_visible(Compartment::Recovered, true);
        assert!(options.series(Compartment::Recovered).visible);
    }

    #[test]
    fn builder_sets_layout() {
        let options = ChartOptions::new()
            .title("Lockdown")
            .x_label("Day")
            .y_label("Share")
            .size(640.0, 480.0)
            .legend(false)
            .grid(false);

        assert_eq!(options.title, "Lockdown");
        assert_eq!(options.x_label, "Day");
        assert_eq!(options.y_label, "Share");
        assert_eq!(options.size, [640.0, 480.0]);
        assert!(!options.legend);
        assert!(!options.grid);
    }
}
