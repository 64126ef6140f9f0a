use codespan_reporting::files::SimpleFiles;
use console::style;
use dexalloc_backend::{allocate, FirstFit};
use dexalloc_common::ssa::{Method, Prettier};
use dexalloc_frontend::parse_listing;
use log::info;

use crate::args::Options;
use crate::console_driver::ConsoleDriver;
use crate::input::read_file;

/// Parse the listing and report any errors in it. Returns `true` if there
/// were none.
pub fn check(options: &Options) -> anyhow::Result<bool> {
    let (methods, driver) = load(options)?;

    let ok = driver.errors() == 0;
    eprintln!(
        "{} {} methods with {} errors",
        style("checked").green().bold(),
        methods.len(),
        driver.errors()
    );

    Ok(ok)
}

/// Allocate registers for every method in the listing and print the
/// annotated result. A method which fails is reported and skipped; the rest
/// are still allocated. Returns `true` if every method went through.
pub fn alloc(options: &Options) -> anyhow::Result<bool> {
    let (mut methods, driver) = load(options)?;
    let mut strategy = FirstFit::new().with_params_high(!options.no_params_high);

    let mut failed = 0;
    for method in methods.iter_mut() {
        match allocate(method, &mut strategy) {
            Ok(mapper) => {
                let prettier = Prettier::new(method)
                    .with_mapper(&mapper)
                    .with_width(options.width);
                println!("{}\n", prettier.pretty_method());
            }

            Err(e) => {
                failed += 1;
                eprintln!(
                    "{}: {}: {e}",
                    style("error").red().bold(),
                    style(&method.name).bold()
                );
            }
        }
    }

    eprintln!(
        "{} {} of {} methods",
        style("allocated").green().bold(),
        methods.len() - failed,
        methods.len()
    );

    Ok(failed == 0 && driver.errors() == 0)
}

fn load(options: &Options) -> anyhow::Result<(Vec<Method>, ConsoleDriver)> {
    let src = read_file(&options.path)?;
    info!("read {}", options.path.display());

    let mut files = SimpleFiles::new();
    let file = files.add(options.path.display().to_string(), src.clone());

    let mut driver = ConsoleDriver::new(files);
    let methods = parse_listing(&mut driver, src, file);

    Ok((methods, driver))
}
