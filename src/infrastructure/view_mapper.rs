// Mapper to convert view documents to their JSON wire form
use crate::domain::view::{
    AxisTick, BandData, Cell, ChartData, ChartKind, GaugeData, Notice, NoticeLevel, Section,
    SeriesData, SeriesStyle, TableData, View,
};
use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ViewDocument {
    pub view: &'static str,
    pub title: String,
    pub notices: Vec<NoticeDocument>,
    pub sections: Vec<SectionDocument>,
}

#[derive(Debug, Serialize)]
pub struct NoticeDocument {
    pub level: &'static str,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionDocument {
    Heading { text: String },
    Text { text: String },
    Gauge(GaugeDocument),
    Chart(ChartDocument),
    Table(TableDocument),
    Notice(NoticeDocument),
}

#[derive(Debug, Serialize)]
pub struct GaugeDocument {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    /// Formatted value, "N/A" when there is none
    pub display: String,
    pub min: f64,
    pub max: Option<f64>,
    pub reference: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ChartDocument {
    pub id: String,
    pub title: String,
    pub kind: &'static str,
    pub x_label: Option<String>,
    pub unit: Option<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y_ticks: Vec<TickDocument>,
    pub series: Vec<SeriesDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<BandDocument>,
}

#[derive(Debug, Serialize)]
pub struct TickDocument {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct SeriesDocument {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub style: &'static str,
    /// `[time_ms, value]` pairs
    pub points: Vec<(i64, f64)>,
}

#[derive(Debug, Serialize)]
pub struct BandDocument {
    pub id: String,
    pub name: String,
    pub fill: Option<String>,
    /// `[time_ms, low, high]` triples
    pub points: Vec<(i64, f64, f64)>,
}

#[derive(Debug, Serialize)]
pub struct TableDocument {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub fn view_to_document(view: View) -> ViewDocument {
    ViewDocument {
        view: view.kind.slug(),
        title: view.title,
        notices: view.notices.into_iter().map(notice_to_document).collect(),
        sections: view.sections.into_iter().map(section_to_document).collect(),
    }
}

pub fn notice_to_document(notice: Notice) -> NoticeDocument {
    let level = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    NoticeDocument {
        level,
        text: notice.text,
    }
}

fn section_to_document(section: Section) -> SectionDocument {
    match section {
        Section::Heading(text) => SectionDocument::Heading { text },
        Section::Text(text) => SectionDocument::Text { text },
        Section::Gauge(gauge) => SectionDocument::Gauge(gauge_to_document(gauge)),
        Section::Chart(chart) => SectionDocument::Chart(chart_to_document(chart)),
        Section::Table(table) => SectionDocument::Table(table_to_document(table)),
        Section::Notice(notice) => SectionDocument::Notice(notice_to_document(notice)),
    }
}

fn gauge_to_document(gauge: GaugeData) -> GaugeDocument {
    let reference = gauge.reference();
    let display = match gauge.value {
        Some(value) => format!("{:.*}", gauge.precision.max(0) as usize, value),
        None => "N/A".to_string(),
    };

    GaugeDocument {
        id: gauge.id,
        title: gauge.title,
        unit: gauge.unit,
        value: gauge.value,
        display,
        min: gauge.min,
        max: gauge.max,
        reference,
    }
}

fn chart_to_document(chart: ChartData) -> ChartDocument {
    let kind = match chart.kind {
        ChartKind::Line => "line",
        ChartKind::MultiLine => "multiLine",
        ChartKind::Status => "status",
    };

    ChartDocument {
        id: chart.id,
        title: chart.title,
        kind,
        x_label: chart.x_label,
        unit: chart.unit,
        y_min: chart.y_min,
        y_max: chart.y_max,
        y_ticks: chart.y_ticks.into_iter().map(tick_to_document).collect(),
        series: chart.series.into_iter().map(series_to_document).collect(),
        band: chart.band.map(band_to_document),
    }
}

fn tick_to_document(tick: AxisTick) -> TickDocument {
    TickDocument {
        value: tick.value,
        label: tick.label,
    }
}

fn series_to_document(series: SeriesData) -> SeriesDocument {
    let style = match series.style {
        SeriesStyle::Line => "lines",
        SeriesStyle::Markers => "markers",
        SeriesStyle::LineMarkers => "lines+markers",
    };

    SeriesDocument {
        id: series.id,
        name: series.name,
        color: series.color,
        style,
        points: series
            .points
            .into_iter()
            .map(|p| (p.time_ms, p.value))
            .collect(),
    }
}

fn band_to_document(band: BandData) -> BandDocument {
    BandDocument {
        id: band.id,
        name: band.name,
        fill: band.fill,
        points: band.points,
    }
}

fn table_to_document(table: TableData) -> TableDocument {
    TableDocument {
        id: table.id,
        title: table.title,
        columns: table.columns,
        rows: table
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_value).collect())
            .collect(),
    }
}

fn cell_to_value(cell: Cell) -> Value {
    match cell {
        Cell::Text(text) => Value::String(text),
        Cell::Number(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Cell::Integer(integer) => Value::from(integer),
        Cell::Timestamp(time_ms) => DateTime::from_timestamp_millis(time_ms)
            .map(|time| Value::String(time.to_rfc3339()))
            .unwrap_or(Value::Null),
        Cell::Empty => Value::Null,
    }
}
