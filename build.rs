use std::{env, fs, path::PathBuf};

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;
use clap_mangen::Man;

include!("src/opts.rs");

// Completions and the man page land next to the binary, in
// target/<profile>/{completions,man}
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/opts.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let target = out_dir
        .ancestors()
        .nth(3)
        .ok_or("OUT_DIR is not inside the target directory")?;

    let mut cmd = Opts::command();

    let completions = target.join("completions");
    fs::create_dir_all(&completions)?;
    for shell in Shell::value_variants() {
        clap_complete::generate_to(*shell, &mut cmd, "wallpaper", &completions)?;
    }

    let man = target.join("man");
    fs::create_dir_all(&man)?;
    Man::new(cmd).render(&mut fs::File::create(man.join("wallpaper.1"))?)?;

    Ok(())
}
