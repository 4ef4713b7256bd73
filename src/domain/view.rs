// View document domain model - what a dashboard client renders

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    LowSoc,
    Soc,
    Efficiency,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Home,
        ViewKind::LowSoc,
        ViewKind::Soc,
        ViewKind::Efficiency,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::LowSoc => "low-soc",
            ViewKind::Soc => "soc",
            ViewKind::Efficiency => "efficiency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Home => "Home",
            ViewKind::LowSoc => "Vehicles with low SOC (<20%)",
            ViewKind::Soc => "SOC by date and vehicle",
            ViewKind::Efficiency => "Vehicle efficiency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Markers,
    LineMarkers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub style: SeriesStyle,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(
        id: &str,
        name: &str,
        color: Option<&str>,
        style: SeriesStyle,
        points: Vec<TimeSeriesPoint>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            style,
            points,
        }
    }
}

/// Shaded range between a lower and an upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct BandData {
    pub id: String,
    pub name: String,
    pub fill: Option<String>,
    /// (time_ms, low, high)
    pub points: Vec<(i64, f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line,
    MultiLine,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub x_label: Option<String>,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub y_ticks: Vec<AxisTick>,
    pub series: Vec<SeriesData>,
    pub band: Option<BandData>,
}

impl ChartData {
    pub fn new(id: &str, title: &str, kind: ChartKind, series: Vec<SeriesData>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            x_label: Some("Time".to_string()),
            unit: None,
            kind,
            y_min: None,
            y_max: None,
            y_ticks: Vec::new(),
            series,
            band: None,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_range(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = Some(y_min);
        self.y_max = Some(y_max);
        self
    }

    pub fn with_ticks(mut self, ticks: &[(i32, &str)]) -> Self {
        self.y_ticks = ticks
            .iter()
            .map(|(value, label)| AxisTick {
                value: f64::from(*value),
                label: label.to_string(),
            })
            .collect();
        self
    }

    pub fn with_band(mut self, band: BandData) -> Self {
        self.band = Some(band);
        self
    }
}

/// KPI gauge. `value == None` renders as "N/A".
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub min: f64,
    pub max: Option<f64>,
    pub precision: i32,
}

impl GaugeData {
    pub fn new(
        id: &str,
        title: &str,
        unit: &str,
        value: Option<f64>,
        min: f64,
        max: Option<f64>,
        precision: i32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            min,
            max,
            precision,
        }
    }

    /// Midpoint of the gauge range; deltas are shown against it.
    pub fn reference(&self) -> Option<f64> {
        self.max.map(|max| (self.min + max) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Timestamp(i64),
    Empty,
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    pub fn new(id: &str, title: &str, columns: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Heading(String),
    Text(String),
    Gauge(GaugeData),
    Chart(ChartData),
    Table(TableData),
    /// Inline notice standing in for a chart that has nothing to plot.
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub title: String,
    pub notices: Vec<Notice>,
    pub sections: Vec<Section>,
}

impl View {
    pub fn new(kind: ViewKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            notices: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartData> {
        self.sections.iter().filter_map(|s| match s {
            Section::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableData> {
        self.sections.iter().filter_map(|s| match s {
            Section::Table(table) => Some(table),
            _ => None,
        })
    }
}
