//! Build script: generates the man page and shell completions from the
//! CLI definition so packagers can ship them straight out of OUT_DIR.

use clap::CommandFactory;
use clap_complete::shells::{Bash, Zsh};

include!("src/cli.rs");

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = match std::env::var_os("OUT_DIR") {
        Some(dir) => std::path::PathBuf::from(dir),
        None => return Ok(()),
    };

    let mut cmd = Cli::command();

    clap_complete::generate_to(Bash, &mut cmd, "nicotine-setup", &out_dir)?;
    clap_complete::generate_to(Zsh, &mut cmd, "nicotine-setup", &out_dir)?;

    let man = clap_mangen::Man::new(cmd);
    let mut buf: Vec<u8> = Vec::new();
    man.render(&mut buf)?;
    std::fs::write(out_dir.join("nicotine-setup.1"), buf)?;

    Ok(())
}
