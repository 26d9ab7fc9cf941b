//! Catalog CLI.
//!
//! # Responsibility
//! - Provide a small executable over `bookshelf_core` for local checks.
//! - Read settings from `BOOKSHELF_*` environment variables.
//!
//! Commands: `ping`, `version`, `readers`, `books`, `add-reader <first> <last>`.
//! Names given to `add-reader` may be form-encoded (`Ann+Marie`, `%C3%A9`).

use bookshelf_core::{CatalogConfig, Engine, MapperRegistry};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CatalogConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CatalogConfig, args: &[String]) -> Result<(), Box<dyn Error>> {
    let command = args.first().map(String::as_str).unwrap_or("ping");
    match command {
        "ping" => println!("bookshelf_core ping={}", bookshelf_core::ping()),
        "version" => println!("bookshelf_core version={}", bookshelf_core::core_version()),
        "readers" => {
            let conn = config.open_db()?;
            for reader in MapperRegistry::new(&conn).reader_mapper().all()? {
                let reader = reader.borrow();
                println!("{}\t{}\t{}", reader.id, reader.first_name, reader.last_name);
            }
        }
        "books" => {
            let conn = config.open_db()?;
            for book in MapperRegistry::new(&conn).book_mapper().all()? {
                println!("{}\t{}\t{}", book.name(), book.author(), book.category());
            }
        }
        "add-reader" => {
            let (Some(first), Some(last)) = (args.get(1), args.get(2)) else {
                return Err("usage: add-reader <first_name> <last_name>".into());
            };
            let engine = Engine::new();
            let user = engine.create_user(
                "reader",
                Engine::decode_value(first)?,
                Engine::decode_value(last)?,
            )?;
            let reader = user
                .into_reader()
                .ok_or("reader tag produced a non-reader user")?;

            let conn = config.open_db()?;
            let registry = MapperRegistry::new(&conn);
            let row_id = registry.reader_mapper().insert(&reader.borrow())?;
            info!("event=cli_add_reader module=cli status=ok row_id={row_id}");
            println!("reader stored with id={row_id}");
        }
        other => return Err(format!("unknown command `{other}`").into()),
    }
    Ok(())
}
