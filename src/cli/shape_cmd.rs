//! Rectangle and square CLI commands

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde_json::Value;

use super::output::Output;
use crate::domain::{IdGenerator, Rectangle, Shape, ShapeDict, ShapeError, Square};
use crate::storage::{codec, Project, ShapeStore};

#[derive(Subcommand)]
pub enum RectCommands {
    /// Add a rectangle
    ///
    /// Examples:
    ///   polygons rect add 4 6            # 4x6 at 0/0, next free id
    ///   polygons rect add 4 6 2 2 --id 12
    Add {
        #[arg(allow_negative_numbers = true)]
        width: i64,

        #[arg(allow_negative_numbers = true)]
        height: i64,

        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        x: i64,

        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        y: i64,

        /// Explicit id (otherwise the next free one)
        #[arg(long, allow_negative_numbers = true)]
        id: Option<i64>,
    },

    #[command(flatten)]
    Collection(CollectionCommands),
}

#[derive(Subcommand)]
pub enum SquareCommands {
    /// Add a square
    ///
    /// Examples:
    ///   polygons square add 5            # 5x5 at 0/0, next free id
    ///   polygons square add 5 1 3 --id 7
    Add {
        #[arg(allow_negative_numbers = true)]
        size: i64,

        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        x: i64,

        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        y: i64,

        /// Explicit id (otherwise the next free one)
        #[arg(long, allow_negative_numbers = true)]
        id: Option<i64>,
    },

    #[command(flatten)]
    Collection(CollectionCommands),
}

/// Commands shared by every shape type
#[derive(Subcommand)]
pub enum CollectionCommands {
    /// List stored shapes with their area
    List,

    /// Bulk-update a stored shape
    ///
    /// Positional values are assigned in field order (id first) and win over
    /// --set. Examples:
    ///   polygons rect update 3 10 2 3        # id=10 width=2 height=3
    ///   polygons square update 3 --set size=9 --set x=1
    Update {
        /// Id of the shape to update
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// New values in field order
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Named assignment (key=value, value parsed as JSON)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, Value)>,
    },

    /// Draw stored shapes as text
    Render,

    /// Write the JSON collection to `<TypeName>.csv`
    ExportCsv,

    /// Replace the JSON collection with the contents of `<TypeName>.csv`
    ImportCsv,
}

/// Parses `key=value`; the value is JSON when it parses as JSON, a string otherwise
fn parse_assignment(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub fn run_rect(cmd: RectCommands, output: &Output) -> Result<()> {
    match cmd {
        RectCommands::Add {
            width,
            height,
            x,
            y,
            id,
        } => add(output, |ids| match id {
            Some(id) => Rectangle::with_id(id, width, height, x, y),
            None => Rectangle::new(ids, width, height, x, y),
        }),
        RectCommands::Collection(cmd) => run_collection::<Rectangle>(cmd, output),
    }
}

pub fn run_square(cmd: SquareCommands, output: &Output) -> Result<()> {
    match cmd {
        SquareCommands::Add { size, x, y, id } => add(output, |ids| match id {
            Some(id) => Square::with_id(id, size, x, y),
            None => Square::new(ids, size, x, y),
        }),
        SquareCommands::Collection(cmd) => run_collection::<Square>(cmd, output),
    }
}

fn run_collection<S: Shape>(cmd: CollectionCommands, output: &Output) -> Result<()> {
    match cmd {
        CollectionCommands::List => list::<S>(output),
        CollectionCommands::Update { id, values, set } => update::<S>(output, id, &values, set),
        CollectionCommands::Render => render::<S>(output),
        CollectionCommands::ExportCsv => export_csv::<S>(output),
        CollectionCommands::ImportCsv => import_csv::<S>(output),
    }
}

/// Id generator continuing after the highest id stored for any shape type
///
/// Rectangles and squares draw from the same counter.
fn id_generator(store: &ShapeStore) -> Result<IdGenerator> {
    let rect_max = load::<Rectangle>(store)?.iter().map(Shape::id).max();
    let square_max = load::<Square>(store)?.iter().map(Shape::id).max();

    let last = rect_max.max(square_max).unwrap_or(0).max(0);
    Ok(IdGenerator::starting_after(last))
}

/// Loads the stored `S` collection
///
/// Stored entries always carry their id, so the generator only feeds the
/// throwaway template ids.
fn load<S: Shape>(store: &ShapeStore) -> Result<Vec<S>> {
    store.load::<S>(&IdGenerator::new())
}

fn add<S, F>(output: &Output, build: F) -> Result<()>
where
    S: Shape,
    F: FnOnce(&IdGenerator) -> Result<S, ShapeError>,
{
    let project = Project::open_current()?;
    let store = project.store()?;

    let ids = id_generator(&store)?;
    output.verbose_ctx("add", &format!("Last used id: {}", ids.last()));

    let shape = build(&ids).with_context(|| format!("Invalid {}", S::TYPE_NAME))?;

    let mut shapes = load::<S>(&store)?;
    shapes.push(shape.clone());
    store.save(Some(shapes.as_slice()))?;
    output.verbose_ctx(
        "add",
        &format!("Saved {} shape(s) to {}", shapes.len(), store.json_path::<S>().display()),
    );

    output.data(&shape.to_dict(), || format!("Added {}\n", shape));
    Ok(())
}

fn list<S: Shape>(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let shapes = load::<S>(&project.store()?)?;
    output.verbose_ctx("list", &format!("Loaded {} {}(s)", shapes.len(), S::TYPE_NAME));

    output.data(&codec::to_dicts(&shapes), || {
        if shapes.is_empty() {
            return format!("No {} shapes stored\n", S::TYPE_NAME);
        }
        shapes
            .iter()
            .map(|shape| format!("{:<40} area={}\n", shape.to_string(), shape.area()))
            .collect()
    });
    Ok(())
}

fn update<S: Shape>(
    output: &Output,
    id: i64,
    values: &[i64],
    set: Vec<(String, Value)>,
) -> Result<()> {
    if values.is_empty() && set.is_empty() {
        bail!("Nothing to update: give values or --set KEY=VALUE");
    }
    if !values.is_empty() && !set.is_empty() {
        output.verbose_ctx("update", "Positional values given, ignoring --set");
    }

    let project = Project::open_current()?;
    let store = project.store()?;
    let mut shapes = load::<S>(&store)?;

    let Some(shape) = shapes.iter_mut().find(|s| s.id() == id) else {
        bail!("No {} with id {}", S::TYPE_NAME, id);
    };

    let named: ShapeDict = set.into_iter().collect();
    shape
        .update(values, &named)
        .with_context(|| format!("Failed to update {} {}", S::TYPE_NAME, id))?;
    let updated = shape.clone();

    store.save(Some(shapes.as_slice()))?;

    output.data(&updated.to_dict(), || format!("Updated {}\n", updated));
    Ok(())
}

fn render<S: Shape>(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let mark = project.config().project.mark;
    let shapes = load::<S>(&project.store()?)?;

    let rendered = shapes
        .iter()
        .map(|s| s.render_with(mark))
        .collect::<Result<Vec<_>, _>>()?;

    let items: Vec<_> = shapes
        .iter()
        .zip(&rendered)
        .map(|(s, render)| serde_json::json!({ "id": s.id(), "render": render }))
        .collect();

    output.data(&items, || rendered.concat());
    Ok(())
}

fn export_csv<S: Shape>(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;
    let shapes = load::<S>(&store)?;

    store.save_csv(Some(shapes.as_slice()))?;

    output.success(&format!(
        "Exported {} {}(s) to {}",
        shapes.len(),
        S::TYPE_NAME,
        store.csv_path::<S>().display()
    ));
    Ok(())
}

fn import_csv<S: Shape>(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.store()?;
    let shapes = store.load_csv::<S>(&IdGenerator::new())?;

    store.save(Some(shapes.as_slice()))?;

    output.success(&format!(
        "Imported {} {}(s) from {}",
        shapes.len(),
        S::TYPE_NAME,
        store.csv_path::<S>().display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assignment_reads_json_values() {
        assert_eq!(
            parse_assignment("width=5").unwrap(),
            ("width".to_string(), Value::from(5))
        );
        assert_eq!(
            parse_assignment("x=\"3\"").unwrap(),
            ("x".to_string(), Value::from("3"))
        );
    }

    #[test]
    fn parse_assignment_falls_back_to_string() {
        assert_eq!(
            parse_assignment("size=big").unwrap(),
            ("size".to_string(), Value::from("big"))
        );
    }

    #[test]
    fn parse_assignment_rejects_malformed_input() {
        assert!(parse_assignment("width").is_err());
        assert!(parse_assignment("=5").is_err());
    }
}
