use lightningcss::{
    bundler::{Bundler, FileProvider},
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions},
};
use std::fs;
use std::path::Path;

const CSS_DIR: &str = "assets/css";
const ENTRY: &str = "assets/css/main.css";
const OUTPUT: &str = "assets/dist/bundle.css";

// Bundles every stylesheet reachable from main.css into one minified file,
// loaded by the layout through asset!()
fn main() {
    println!("cargo:rerun-if-changed={}", CSS_DIR);
    for entry in fs::read_dir(CSS_DIR).expect("Failed to read assets/css").flatten() {
        println!("cargo:rerun-if-changed={}", entry.path().display());
    }

    let output = Path::new(OUTPUT);
    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir).expect("Failed to create assets/dist directory");
    }

    let fs_provider = FileProvider::new();
    let mut bundler = Bundler::new(&fs_provider, None, ParserOptions::default());
    let mut stylesheet = bundler.bundle(Path::new(ENTRY)).expect("Failed to bundle CSS");

    stylesheet
        .minify(MinifyOptions::default())
        .expect("Failed to minify CSS");

    let printer = PrinterOptions {
        minify: true,
        ..Default::default()
    };
    let css = stylesheet.to_css(printer).expect("Failed to generate CSS output");

    fs::write(output, css.code).expect("Failed to write bundle.css");
}
