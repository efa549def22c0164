//! Trellis Smoke Harness
//!
//! Builds a grid container from command-line flags, runs a measure and an
//! arrange pass, and prints the resolved geometry as JSON.
//!
//! ```text
//! trellis-smoke --columns "100,Auto,*" --column-spacing 10 --width 300 \
//!     --cell 1,0,1,1,40,20
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use trellis_common::{init_logging, LogConfig};
use trellis_layout::{
    Bounds, GridBuilder, GridChild, GridContainer, GridPlacement, HorizontalAlignment,
    LayoutError, Orientation, OrientationDirection, VerticalAlignment, Visibility,
};

/// Parse command line arguments
struct Args {
    columns: String,
    rows: String,
    width: i32,
    height: i32,
    column_spacing: i32,
    row_spacing: i32,
    scale: f32,
    halign: String,
    valign: String,
    orientation: Option<String>,
    reverse: bool,
    cells: Vec<String>,
    json_logs: bool,
    compact: bool,
}

impl Args {
    fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        let mut parsed = Self {
            columns: "*".to_string(),
            rows: "*".to_string(),
            width: 800,
            height: 600,
            column_spacing: 0,
            row_spacing: 0,
            scale: 1.0,
            halign: "stretch".to_string(),
            valign: "stretch".to_string(),
            orientation: None,
            reverse: false,
            cells: Vec::new(),
            json_logs: false,
            compact: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--columns" => {
                    if let Some(val) = args.next() {
                        parsed.columns = val;
                    }
                }
                "--rows" => {
                    if let Some(val) = args.next() {
                        parsed.rows = val;
                    }
                }
                "--width" => {
                    if let Some(val) = args.next() {
                        parsed.width = val.parse().unwrap_or(800);
                    }
                }
                "--height" => {
                    if let Some(val) = args.next() {
                        parsed.height = val.parse().unwrap_or(600);
                    }
                }
                "--column-spacing" => {
                    if let Some(val) = args.next() {
                        parsed.column_spacing = val.parse().unwrap_or(0);
                    }
                }
                "--row-spacing" => {
                    if let Some(val) = args.next() {
                        parsed.row_spacing = val.parse().unwrap_or(0);
                    }
                }
                "--scale" => {
                    if let Some(val) = args.next() {
                        parsed.scale = val.parse().unwrap_or(1.0);
                    }
                }
                "--halign" => {
                    if let Some(val) = args.next() {
                        parsed.halign = val;
                    }
                }
                "--valign" => {
                    if let Some(val) = args.next() {
                        parsed.valign = val;
                    }
                }
                "--orientation" => {
                    parsed.orientation = args.next();
                }
                "--reverse" => parsed.reverse = true,
                "--cell" => {
                    if let Some(val) = args.next() {
                        parsed.cells.push(val);
                    }
                }
                "--json-logs" => parsed.json_logs = true,
                "--compact" => parsed.compact = true,
                _ => {}
            }
        }

        parsed
    }
}

/// A child with a fixed desired size.
#[derive(Debug, Clone, PartialEq)]
struct SmokeChild {
    placement: GridPlacement,
    width: i32,
    height: i32,
}

impl GridChild for SmokeChild {
    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    fn placement(&self) -> GridPlacement {
        self.placement
    }

    fn set_placement(&mut self, placement: GridPlacement) {
        self.placement = placement;
    }

    fn measure_width(&self, _available: i32) -> i32 {
        self.width
    }

    fn measure_height(&self, _available: i32) -> i32 {
        self.height
    }
}

/// Parse `column,row,column_span,row_span,width,height`.
fn parse_cell(spec: &str) -> Result<SmokeChild, LayoutError> {
    let fields = spec
        .split(',')
        .map(|field| field.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| LayoutError::InvalidPlacement(format!("{spec:?}: {err}")))?;

    match fields.as_slice() {
        &[column, row, column_span, row_span, width, height] => Ok(SmokeChild {
            placement: GridPlacement::new(column, row, column_span, row_span),
            width: width.max(0),
            height: height.max(0),
        }),
        _ => Err(LayoutError::InvalidPlacement(format!(
            "{spec:?}: expected 6 fields, got {}",
            fields.len()
        ))),
    }
}

fn parse_halign(value: &str) -> Result<HorizontalAlignment, LayoutError> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Ok(HorizontalAlignment::Left),
        "center" => Ok(HorizontalAlignment::Center),
        "right" => Ok(HorizontalAlignment::Right),
        "stretch" => Ok(HorizontalAlignment::Stretch),
        _ => Err(LayoutError::InvalidConfig(format!(
            "unknown horizontal alignment {value:?}"
        ))),
    }
}

fn parse_valign(value: &str) -> Result<VerticalAlignment, LayoutError> {
    match value.to_ascii_lowercase().as_str() {
        "top" => Ok(VerticalAlignment::Top),
        "center" => Ok(VerticalAlignment::Center),
        "bottom" => Ok(VerticalAlignment::Bottom),
        "stretch" => Ok(VerticalAlignment::Stretch),
        _ => Err(LayoutError::InvalidConfig(format!(
            "unknown vertical alignment {value:?}"
        ))),
    }
}

fn parse_orientation(value: &str) -> Result<Orientation, LayoutError> {
    match value.to_ascii_lowercase().as_str() {
        "horizontal" => Ok(Orientation::Horizontal),
        "vertical" => Ok(Orientation::Vertical),
        _ => Err(LayoutError::InvalidConfig(format!(
            "unknown orientation {value:?}"
        ))),
    }
}

fn build_container(args: &Args) -> Result<GridContainer, LayoutError> {
    let mut builder = GridBuilder::new()
        .columns(args.columns.as_str())
        .rows(args.rows.as_str())
        .column_spacing(args.column_spacing)
        .row_spacing(args.row_spacing)
        .scale(args.scale, args.scale)
        .horizontal_alignment(parse_halign(&args.halign)?)
        .vertical_alignment(parse_valign(&args.valign)?);

    if let Some(orientation) = &args.orientation {
        let direction = if args.reverse {
            OrientationDirection::Reverse
        } else {
            OrientationDirection::Normal
        };
        builder = builder.orientation(parse_orientation(orientation)?, direction);
    }

    for cell in &args.cells {
        builder = builder.child(Box::new(parse_cell(cell)?));
    }

    builder.build()
}

#[derive(Debug, Serialize)]
struct AxisReport {
    definition: String,
    spacing: i32,
    sizes: Vec<i32>,
    positions: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct ChildReport {
    index: usize,
    column: usize,
    row: usize,
    bounds: Option<[i32; 4]>,
}

#[derive(Debug, Serialize)]
struct Report {
    bounds: [i32; 4],
    desired_width: i32,
    desired_height: i32,
    columns: AxisReport,
    rows: AxisReport,
    children: Vec<ChildReport>,
}

fn run(args: &Args) -> Result<Report> {
    let mut container = build_container(args).context("invalid grid configuration")?;

    let desired_width = container.measure_width(args.width);
    let desired_height = container.measure_height(args.height);
    debug!(desired_width, desired_height, "measured container");

    let bounds = Bounds::new(0, 0, args.width, args.height);
    let rects = container.arrange(bounds);

    let placements: Vec<GridPlacement> = container
        .children()
        .borrow()
        .iter()
        .map(|child| child.placement())
        .collect();

    let grid = container.grid();
    let columns = AxisReport {
        definition: grid.columns().columns().to_string(),
        spacing: grid.columns().column_spacing(),
        sizes: grid.column_widths().to_vec(),
        positions: grid.column_positions().to_vec(),
    };
    let rows = AxisReport {
        definition: grid.rows().rows().to_string(),
        spacing: grid.rows().row_spacing(),
        sizes: grid.row_heights().to_vec(),
        positions: grid.row_positions().to_vec(),
    };

    let children = rects
        .iter()
        .zip(&placements)
        .enumerate()
        .map(|(index, (rect, placement))| ChildReport {
            index,
            column: placement.column,
            row: placement.row,
            bounds: rect.map(|r| [r.x, r.y, r.width, r.height]),
        })
        .collect();

    Ok(Report {
        bounds: [bounds.x, bounds.y, bounds.width, bounds.height],
        desired_width,
        desired_height,
        columns,
        rows,
        children,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&LogConfig::default().with_json(args.json_logs))
        .context("failed to initialize logging")?;

    info!(
        columns = %args.columns,
        rows = %args.rows,
        width = args.width,
        height = args.height,
        cells = args.cells.len(),
        "Starting Trellis Smoke Harness"
    );

    let report = run(&args)?;
    let output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");

    info!(
        columns = report.columns.sizes.len(),
        rows = report.rows.sizes.len(),
        "Smoke run complete"
    );
    Ok(())
}
