use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

mod libhenshuu;

#[cfg(feature = "cli")]
mod cli;
#[cfg(feature = "gui")]
mod gui;

use crate::libhenshuu::mondai::IdAlloc;
use crate::libhenshuu::shiken;

#[derive(Parser, Debug)]
#[command(name = "問題編集しよう！ (Mondaihenshūshiyō!)")]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "exam.json")]
    exam: Option<PathBuf>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[derive(Debug, Error)]
enum Error {
    #[error("cannot access exam file")]
    ExamRead(#[from] io::Error),
    #[error("malformed exam file")]
    ExamParse(#[from] serde_json::Error),
    #[cfg(feature = "gui")]
    #[error("gui failed")]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), Error> {
    //INIT START
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let exam_path = args.exam.unwrap_or(PathBuf::from("exam.json"));
    let mut shiken = shiken::load_or_new(&exam_path)?;
    debug!("[Setup] Loaded {} questions", shiken.questions.len());

    let mut ids = IdAlloc::seed(&shiken.questions);
    // INIT DONE

    cfg_if::cfg_if! {
        if #[cfg(feature = "gui")] {
            gui::init_gui(&mut shiken, &mut ids)?;
        } else if #[cfg(feature = "cli")] {
            cli::cli_loop(&mut shiken, &mut ids)?;
        } else {
            compile_error!("enable the `gui` or `cli` feature");
        }
    }

    let shiken = shiken.persisted(&mut ids);
    shiken::save(&exam_path, &shiken)?;
    println!(
        "{}",
        format!(
            "Saved {} questions to {:?}.",
            shiken.questions.len(),
            exam_path
        )
        .cyan()
    );
    Ok(())
}
