//! Read-only summary of an ECharts-style chart option.
//!
//! The render service understands a subset of the ECharts option format. This
//! module reads that subset leniently so callers can inspect an option (and
//! get early warnings) before it is sent. Unknown keys and mistyped values are
//! skipped rather than rejected; the service remains the authority.

use std::fmt;

use serde_json::Value;

use crate::core::types::ChartSpec;

/// Box padding in pixels, CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Expands 1..4 values the way CSS shorthand does.
    ///
    /// Values past the fourth are ignored. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match *values {
            [] => None,
            [all] => Some(Self {
                top: all,
                right: all,
                bottom: all,
                left: all,
            }),
            [vertical, horizontal] => Some(Self {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            }),
            [top, horizontal, bottom] => Some(Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            }),
            [top, right, bottom, left, ..] => Some(Self {
                top,
                right,
                bottom,
                left,
            }),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let values: Vec<f64> = one_or_many(value).filter_map(Value::as_f64).collect();
        Self::from_values(&values)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XAxisSummary {
    pub categories: usize,
    pub boundary_gap: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct YAxisSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub formatter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSummary {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub points: usize,
    pub y_axis_index: usize,
    /// Names of individual data items (`{ name, value }` entries).
    pub item_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EChartsSummary {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub padding: Option<Padding>,
    pub x_axes: Vec<XAxisSummary>,
    pub y_axes: Vec<YAxisSummary>,
    pub legend: Vec<String>,
    pub series: Vec<SeriesSummary>,
}

impl EChartsSummary {
    #[must_use]
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let Some(root) = spec.as_value().as_object() else {
            return Self::default();
        };

        let title = root
            .get("title")
            .and_then(|title| title.get("text"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        let theme = root.get("theme").and_then(Value::as_str).map(str::to_owned);
        let padding = root.get("padding").and_then(Padding::from_value);

        let x_axes = root
            .get("xAxis")
            .map(|axis| {
                one_or_many(axis)
                    .filter(|item| item.is_object())
                    .map(|item| XAxisSummary {
                        categories: item.get("data").and_then(Value::as_array).map_or(0, Vec::len),
                        boundary_gap: item.get("boundaryGap").and_then(Value::as_bool),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let y_axes = root
            .get("yAxis")
            .map(|axis| {
                one_or_many(axis)
                    .filter(|item| item.is_object())
                    .map(|item| YAxisSummary {
                        min: item.get("min").and_then(Value::as_f64),
                        max: item.get("max").and_then(Value::as_f64),
                        formatter: item
                            .get("axisLabel")
                            .and_then(|label| label.get("formatter"))
                            .and_then(Value::as_str)
                            .map(str::to_owned),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let legend = root
            .get("legend")
            .and_then(|legend| legend.get("data"))
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let series = root
            .get("series")
            .map(|series| one_or_many(series).map(summarize_series).collect())
            .unwrap_or_default();

        Self {
            title,
            theme,
            padding,
            x_axes,
            y_axes,
            legend,
            series,
        }
    }

    /// Non-fatal problems the render service is likely to ignore silently.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.series.is_empty() {
            warnings.push("option has no series".to_owned());
        }

        // The service only needs a y axis declared when a series points past the first one.
        let y_axis_count = self.y_axes.len().max(1);
        for (idx, series) in self.series.iter().enumerate() {
            if series.kind.is_none() {
                warnings.push(format!("series[{idx}] has no `type`"));
            }
            if series.y_axis_index >= y_axis_count {
                warnings.push(format!(
                    "series[{idx}] uses yAxisIndex {} but only {y_axis_count} y axis is defined",
                    series.y_axis_index
                ));
            }
        }

        let pie = self
            .series
            .first()
            .is_some_and(|series| series.kind.as_deref() == Some("pie"));
        let known_names: Vec<&str> = if pie {
            self.series[0].item_names.iter().map(String::as_str).collect()
        } else {
            self.series.iter().filter_map(|s| s.name.as_deref()).collect()
        };
        for name in &self.legend {
            if !known_names.contains(&name.as_str()) {
                warnings.push(format!("legend entry `{name}` does not match any series"));
            }
        }
        warnings
    }
}

impl fmt::Display for EChartsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "title: {}", self.title.as_deref().unwrap_or("-"))?;
        if let Some(theme) = &self.theme {
            writeln!(f, "theme: {theme}")?;
        }
        if let Some(p) = self.padding {
            writeln!(
                f,
                "padding: top={} right={} bottom={} left={}",
                p.top, p.right, p.bottom, p.left
            )?;
        }
        for (idx, axis) in self.x_axes.iter().enumerate() {
            writeln!(f, "xAxis[{idx}]: {} categories", axis.categories)?;
        }
        for (idx, axis) in self.y_axes.iter().enumerate() {
            let bound = |v: Option<f64>| v.map_or_else(|| "auto".to_owned(), |v| v.to_string());
            writeln!(f, "yAxis[{idx}]: min={} max={}", bound(axis.min), bound(axis.max))?;
        }
        if !self.legend.is_empty() {
            writeln!(f, "legend: {}", self.legend.join(", "))?;
        }
        for (idx, series) in self.series.iter().enumerate() {
            writeln!(
                f,
                "series[{idx}]: type={} name={} points={}",
                series.kind.as_deref().unwrap_or("?"),
                series.name.as_deref().unwrap_or("-"),
                series.points
            )?;
        }
        Ok(())
    }
}

fn summarize_series(series: &Value) -> SeriesSummary {
    let data = series.get("data").and_then(Value::as_array);
    SeriesSummary {
        kind: series.get("type").and_then(Value::as_str).map(str::to_owned),
        name: series.get("name").and_then(Value::as_str).map(str::to_owned),
        points: data.map_or(0, Vec::len),
        y_axis_index: series
            .get("yAxisIndex")
            .and_then(Value::as_u64)
            .and_then(|idx| usize::try_from(idx).ok())
            .unwrap_or(0),
        item_names: data
            .into_iter()
            .flatten()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .map(str::to_owned)
            .collect(),
    }
}

/// A single value is treated as a one-element list.
fn one_or_many(value: &Value) -> impl Iterator<Item = &Value> {
    let items: &[Value] = match value {
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    };
    items.iter()
}
