use crate::config::{Config, load_config};
use crate::ir::{Wall, wall_label};
use crate::order::{group_routes_by_wall, sort_routes_by_wall};
use crate::order_dump::{OrderDump, write_order_dump};
use crate::parser::{ParsedRoutes, RouteRecord, parse_routes};
use crate::render::{render_wall_svg, write_output_svg};
use crate::walls::parse_wall;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "wallord", version, about = "Order climbing routes the way each wall is read")]
pub struct Args {
    /// Input file (JSON route list) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted (required for PNG).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Wall to order for (e.g. boulderSouth, ABWall, default)
    #[arg(short = 'w', long = "wall")]
    pub wall: Option<String>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write computed keys and matched segments as JSON
    #[arg(long = "dumpKeys")]
    pub dump_keys: Option<PathBuf>,

    /// Log filter (tracing EnvFilter syntax)
    #[arg(long = "logLevel", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Ids,
    Svg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSelection {
    Single(Option<Wall>),
    PerRoute,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let parsed = parse_routes(&input)?;
    let cli_wall = args.wall.as_deref().map(parse_wall).transpose()?;
    let selection = resolve_wall(cli_wall, &parsed, &config);
    info!(routes = parsed.routes.len(), ?selection, "ordering routes");

    let groups = order_routes(&parsed.routes, selection);

    if let Some(dump_path) = args.dump_keys.as_deref() {
        let walls: Vec<Option<Wall>> = groups.keys().copied().collect();
        write_dumps(dump_path, &parsed.routes, selection, &walls)?;
    }

    match args.output_format {
        OutputFormat::Json => {
            let text = format_json(&groups, selection)?;
            write_output_text(&text, args.output.as_deref())?;
        }
        OutputFormat::Ids => {
            let text = format_ids(&groups, selection);
            write_output_text(&text, args.output.as_deref())?;
        }
        OutputFormat::Svg | OutputFormat::Png => {
            let (wall, routes) = single_group(&groups)?;
            let svg = render_wall_svg(routes, wall, &config.theme, &config.render);
            if args.output_format == OutputFormat::Svg {
                write_output_svg(&svg, args.output.as_deref())?;
            } else {
                let output = ensure_output(&args.output, "png")?;
                write_png(&svg, &output, &config)?;
            }
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Command line beats the document, which beats the config file. With none
/// of those, routes carrying their own `wall` are grouped per wall.
pub fn resolve_wall(
    cli_wall: Option<Option<Wall>>,
    parsed: &ParsedRoutes,
    config: &Config,
) -> WallSelection {
    if let Some(wall) = cli_wall.or(parsed.wall).or(config.order.default_wall) {
        return WallSelection::Single(wall);
    }
    if parsed.has_route_walls() {
        WallSelection::PerRoute
    } else {
        WallSelection::Single(None)
    }
}

pub fn order_routes(
    routes: &[RouteRecord],
    selection: WallSelection,
) -> BTreeMap<Option<Wall>, Vec<RouteRecord>> {
    match selection {
        WallSelection::Single(wall) => {
            let mut groups = BTreeMap::new();
            groups.insert(wall, sort_routes_by_wall(routes, wall));
            groups
        }
        WallSelection::PerRoute => group_routes_by_wall(routes, |route| route.wall),
    }
}

fn format_json(
    groups: &BTreeMap<Option<Wall>, Vec<RouteRecord>>,
    selection: WallSelection,
) -> Result<String> {
    let as_array =
        |routes: &[RouteRecord]| serde_json::Value::Array(routes.iter().map(|r| r.raw.clone()).collect());
    let value = match selection {
        WallSelection::Single(_) => as_array(groups.values().next().map(Vec::as_slice).unwrap_or(&[])),
        WallSelection::PerRoute => {
            let mut object = serde_json::Map::new();
            for (wall, routes) in groups {
                object.insert(wall_label(*wall).to_string(), as_array(routes.as_slice()));
            }
            serde_json::Value::Object(object)
        }
    };
    let mut text = serde_json::to_string_pretty(&value)?;
    text.push('\n');
    Ok(text)
}

fn route_label(route: &RouteRecord) -> String {
    route.id.clone().unwrap_or_else(|| "-".to_string())
}

fn format_ids(groups: &BTreeMap<Option<Wall>, Vec<RouteRecord>>, selection: WallSelection) -> String {
    let mut out = String::new();
    for (wall, routes) in groups {
        if selection == WallSelection::PerRoute {
            out.push_str(&format!("# {}\n", wall_label(*wall)));
        }
        for route in routes {
            out.push_str(&route_label(route));
            out.push('\n');
        }
    }
    out
}

fn single_group(
    groups: &BTreeMap<Option<Wall>, Vec<RouteRecord>>,
) -> Result<(Option<Wall>, &[RouteRecord])> {
    let mut iter = groups.iter();
    let (wall, routes) = iter
        .next()
        .ok_or_else(|| anyhow::anyhow!("No routes to render"))?;
    if iter.next().is_some() {
        warn!(
            wall = wall_label(*wall),
            walls = groups.len(),
            "input spans several walls; rendering the first one only (pass --wall to choose)"
        );
    }
    Ok((*wall, routes.as_slice()))
}

fn write_dumps(
    path: &Path,
    routes: &[RouteRecord],
    selection: WallSelection,
    walls: &[Option<Wall>],
) -> Result<()> {
    match selection {
        WallSelection::Single(wall) => write_order_dump(path, &OrderDump::from_routes(routes, wall)),
        WallSelection::PerRoute => {
            for (wall, dump_path) in walls.iter().zip(dump_paths(path, walls)) {
                // Dumps keep input indices, so build them from the unsorted subset.
                let subset: Vec<&RouteRecord> =
                    routes.iter().filter(|route| route.wall == *wall).collect();
                write_order_dump(&dump_path, &OrderDump::from_routes(&subset, *wall))?;
            }
            Ok(())
        }
    }
}

fn dump_paths(base: &Path, walls: &[Option<Wall>]) -> Vec<PathBuf> {
    if base.is_dir() {
        return walls
            .iter()
            .map(|wall| base.join(format!("{}.json", wall_label(*wall))))
            .collect();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("keys");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    walls
        .iter()
        .map(|wall| parent.join(format!("{}-{}.json", stem, wall_label(*wall))))
        .collect()
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
