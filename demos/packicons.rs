//! Packs one or more images into an icon file for a platform, scaling the
//! largest input to fill in any missing sizes.
//!
//! To create a Windows icon from a PNG file, run:
//!
//! ```shell
//! cargo run --example packicons <out.ico> windows <path/to/logo.png>
//! ```
//!
//! Inputs may be PNG, BMP, or QOI images, or existing ICO or ICNS files;
//! images are placed into the slots of matching size, and the first image
//! loaded for a given size wins.  The output format is taken from the
//! extension of the output path (.ico or .icns).
//!
//! Set `RUST_LOG=debug` to see which images were skipped and why.

extern crate env_logger;
extern crate iconpack;

use iconpack::{ContainerFormat, ExportOptions, IconPack, LoadOptions,
               Platform, ScaleAlgorithm, Selection};
use std::env;
use std::str::FromStr;

fn main() {
    env_logger::init();
    let num_args = env::args().count();
    if num_args < 4 {
        println!("Usage: packicons <output> <platform> <input>...");
        return;
    }
    let output = env::args().nth(1).unwrap();
    let format = ContainerFormat::from_path(&output)
        .expect("output must end in .ico or .icns");
    let platform = Platform::from_str(&env::args().nth(2).unwrap())
        .expect("unknown platform");

    let mut pack = IconPack::new(platform);
    let options = LoadOptions::default();
    for input in env::args().skip(3) {
        let entries = iconpack::load_file(&input, &options)
            .expect("failed to load input file");
        let filled = iconpack::reconcile(&mut pack, entries)
            .expect("failed to place images");
        println!("{}: filled {} slot(s)", input, filled);
    }
    let generated = iconpack::generate_missing(&mut pack,
                                               Selection::AllMissing,
                                               ScaleAlgorithm::Bicubic)
        .expect("failed to generate missing sizes");
    println!("generated {} of {} {} icons",
             generated,
             pack.len(),
             platform);

    iconpack::save_file(&output,
                        format,
                        pack.slots(),
                        &ExportOptions::default())
        .expect("failed to write icon file");
}
