use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "striplet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and build a comic script, loading all character assets.
    Check(CheckArgs),
    /// Build a comic script and print the computed geometry tree.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input comic script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input comic script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn read_script_json(path: &Path) -> anyhow::Result<striplet::ComicScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: striplet::ComicScript =
        serde_json::from_reader(r).with_context(|| "parse script JSON")?;
    Ok(script)
}

fn build_comic(in_path: &Path) -> anyhow::Result<striplet::Comic> {
    let script = read_script_json(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let comic = script
        .build(assets_root)
        .with_context(|| format!("build comic from '{}'", in_path.display()))?;
    Ok(comic)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let comic = build_comic(&args.in_path)?;

    let characters: usize = comic.panels().iter().map(|p| p.characters().len()).sum();
    let dialogs: usize = comic.panels().iter().map(|p| p.dialogs().len()).sum();
    eprintln!(
        "ok: {} panels, {characters} characters, {dialogs} dialogs",
        comic.panels().len()
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let comic = build_comic(&args.in_path)?;

    println!(
        "comic \"{}\" {}x{} gutter {}",
        comic.title(),
        comic.width(),
        comic.height(),
        comic.gutter()
    );
    for panel in comic.panels() {
        println!(
            "  panel {}: x={} y={} width={}{} height={} fill={}",
            panel.index(),
            panel.x(),
            panel.y(),
            panel.width(),
            if panel.is_fixed_width() { " (fixed)" } else { "" },
            panel.height(),
            panel.fill()
        );
        for character in panel.characters() {
            let (w, h) = character.size();
            println!(
                "    character {}: x={} y={} size={}x{} facing={} align={}/{} resource={}",
                character.index(),
                character.offset().x,
                character.offset().y,
                w,
                h,
                character.direction().as_name(),
                character.h_align().as_name(),
                character.v_align().as_name(),
                character.resource()
            );
        }
        for dialog in panel.dialogs() {
            println!(
                "    dialog {}: x={} y={} anchor={} style={} text={:?}",
                dialog.index(),
                dialog.offset().x,
                dialog.offset().y,
                striplet::layout::text_anchor(dialog.h_align()),
                dialog.style().as_name(),
                dialog.text()
            );
        }
    }
    Ok(())
}
