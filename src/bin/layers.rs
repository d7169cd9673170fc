//! Print a board's layer grids.
//!
//! The keymaps are data, and data is easiest to review as a picture.  This
//! renders each layer the way it sits on the desk, one row per matrix row.

use clap::{Parser, ValueEnum};

use duet_keyboard::layout::Action;
use duet_keyboard::Mods;

#[derive(Parser)]
#[command(about = "Render keymap layers as text")]
struct Args {
    /// Which board to render.
    #[arg(value_enum)]
    board: Board,
}

#[derive(ValueEnum, Clone, Copy)]
enum Board {
    #[cfg(feature = "voyager")]
    Voyager,
    #[cfg(feature = "madromys")]
    Madromys,
}

fn main() {
    let args = Args::parse();
    match args.board {
        #[cfg(feature = "voyager")]
        Board::Voyager => {
            use duet_keyboard::keys::voyager::GEOMETRY;
            use duet_keyboard::layout::voyager::LAYERS;
            render("voyager", GEOMETRY.cols as usize, &LAYERS);
        }
        #[cfg(feature = "madromys")]
        Board::Madromys => {
            use duet_keyboard::keys::madromys::GEOMETRY;
            use duet_keyboard::layout::madromys::LAYERS;
            render("madromys", GEOMETRY.cols as usize, &LAYERS);
        }
    }
}

fn render<const N: usize>(name: &str, cols: usize, layers: &[&[Action; N]]) {
    for (index, layer) in layers.iter().enumerate() {
        println!("{} layer {}:", name, index);
        for row in layer.chunks(cols) {
            let cells: Vec<String> = row.iter().map(|a| format!("{:<18}", label(a))).collect();
            println!("  {}", cells.join(" "));
        }
        println!();
    }
}

fn label(action: &Action) -> String {
    match action {
        Action::None => String::new(),
        Action::Trans => String::from("___"),
        Action::Key(key) => format!("{:?}", key),
        Action::Mod(mods, key) => format!("{}-{:?}", mods_label(*mods), key),
        Action::Mods(mods) => mods_label(*mods),
        Action::ModTap(mods, tap) => format!("{}/{:?}", mods_label(*mods), tap),
        Action::LayerTap(layer, tap) => format!("L{}/{:?}", layer, tap),
        Action::Momentary(layer) => format!("MO({})", layer),
        Action::Toggle(layer) => format!("TG({})", layer),
        Action::TapDance(id) => format!("TD({})", id),
        Action::Consumer(usage) => format!("{:?}", usage),
        Action::Mouse(button) => format!("Mouse{:?}", button),
        Action::CapsWord => String::from("CapsWord"),
        Action::Macro(id) => format!("{:?}", id),
        Action::RgbSolid => String::from("RgbSolid"),
    }
}

fn mods_label(mods: Mods) -> String {
    if mods == Mods::HYPER {
        return String::from("Hyper");
    }
    if mods == Mods::MEH {
        return String::from("Meh");
    }
    let mut parts = Vec::new();
    if mods.contains(Mods::CONTROL) {
        parts.push("C");
    }
    if mods.contains(Mods::SHIFT) {
        parts.push("S");
    }
    if mods.contains(Mods::ALT) {
        parts.push("A");
    }
    if mods.contains(Mods::GUI) {
        parts.push("G");
    }
    parts.join("")
}
