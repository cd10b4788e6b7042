pub mod echarts;
pub mod object_literal;
pub mod option_text;
pub mod types;

pub use echarts::{EChartsSummary, Padding, SeriesSummary, XAxisSummary, YAxisSummary};
pub use object_literal::{LiteralParse, parse_literal_at, parse_object_literal};
pub use option_text::{OPTION_ASSIGNMENT, OptionSyntax, parse_chart_spec};
pub use types::{ChartSpec, OutputKind, RenderResult};
