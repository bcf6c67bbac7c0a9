use std::env;
use std::error;
use std::fs;
use std::process;

use log::info;

use glyphpack::writer::write_internal_font;
use glyphpack::Font;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <font.ttf> <output.bin>", args[0]);
        process::exit(2);
    }
    if let Err(err) = run(&args[1], &args[2]) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(font_path: &str, out_path: &str) -> Result<(), Box<dyn error::Error>> {
    let buf = fs::read(font_path)?;
    let font = Font::from_buffer(&buf)?;
    info!(
        "{}: {} glyphs, {} units per em, bbox ({}, {})..({}, {})",
        font_path, font.num_glyphs, font.units_per_em, font.x_min, font.y_min, font.x_max,
        font.y_max
    );

    let artifact = write_internal_font(&font)?;
    fs::write(out_path, &artifact)?;
    info!("wrote {} bytes to {}", artifact.len(), out_path);
    Ok(())
}
