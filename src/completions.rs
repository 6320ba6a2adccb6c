use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::app::AppError;

const BIN_NAME: &str = "dwd";

pub fn generate_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = crate::cli::Cli::command();
    generate(shell, &mut cmd, BIN_NAME, buf);
}

pub fn detect_current_shell() -> Option<Shell> {
    let shell_var = std::env::var("SHELL").ok()?;
    parse_shell(shell_var.rsplit('/').next()?)
}

fn completions_install_path_for_home(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Bash => Some(home.join(".local/share/bash-completion/completions/dwd")),
        Shell::Zsh => Some(home.join(".config/districtworks/completions/dwd.zsh")),
        Shell::Fish => Some(home.join(".config/fish/completions/dwd.fish")),
        _ => None,
    }
}

fn install_completions_under(shell: Shell, home: &Path) -> io::Result<PathBuf> {
    let path = completions_install_path_for_home(shell, home).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no install path for {shell:?}"),
        )
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut buf = Vec::new();
    generate_completions(shell, &mut buf);
    std::fs::write(&path, buf)?;

    if shell == Shell::Zsh {
        patch_zshrc(home, &path)?;
    }
    Ok(path)
}

fn patch_zshrc(home: &Path, completions_path: &Path) -> io::Result<()> {
    let zshrc = home.join(".zshrc");
    let source_line = format!("source \"{}\"", completions_path.display());

    if zshrc.exists() {
        let content = std::fs::read_to_string(&zshrc)?;
        if content.contains(&source_line) {
            return Ok(());
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&zshrc)?;
    writeln!(file)?;
    writeln!(file, "# dwd shell completions")?;
    writeln!(file, "{source_line}")?;
    Ok(())
}

fn parse_shell(raw: &str) -> Option<Shell> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        _ => None,
    }
}

pub fn run_completions_command(shell_arg: Option<&str>, install: bool) -> Result<(), AppError> {
    let shell = match shell_arg {
        Some(name) => parse_shell(name)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown shell '{name}'")))?,
        None => detect_current_shell().ok_or_else(|| {
            AppError::InvalidArgument(
                "unable to detect shell from $SHELL; pass a shell name".to_string(),
            )
        })?,
    };

    if install {
        let home = std::env::var_os("HOME").ok_or_else(|| {
            AppError::InvalidArgument("HOME is not set; cannot install completions".to_string())
        })?;
        let path = install_completions_under(shell, Path::new(&home))?;
        println!("completions installed to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate_completions(shell, &mut stdout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_shell_is_case_insensitive() {
        assert_eq!(parse_shell("BASH"), Some(Shell::Bash));
        assert_eq!(parse_shell("Zsh"), Some(Shell::Zsh));
        assert_eq!(parse_shell("pwsh"), Some(Shell::PowerShell));
        assert_eq!(parse_shell("csh"), None);
    }

    #[test]
    fn generated_script_names_the_binary() {
        let mut buf = Vec::new();
        generate_completions(Shell::Bash, &mut buf);
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("dwd"), "bash completions should reference dwd");
        assert!(text.contains("add-supervisor"));
    }

    #[test]
    fn install_paths_cover_common_shells_only() {
        let home = PathBuf::from("/tmp/test-home");
        let zsh = completions_install_path_for_home(Shell::Zsh, &home).expect("zsh path");
        assert!(zsh.ends_with("dwd.zsh"));
        assert!(completions_install_path_for_home(Shell::Elvish, &home).is_none());
    }

    #[test]
    fn zsh_install_patches_rc_once() {
        let home =
            std::env::temp_dir().join(format!("districtworks-comp-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&home).expect("home should be creatable");

        let path = install_completions_under(Shell::Zsh, &home).expect("zsh install");
        assert!(path.exists());
        install_completions_under(Shell::Zsh, &home).expect("second zsh install");
        let rc = std::fs::read_to_string(home.join(".zshrc")).expect(".zshrc should exist");
        assert_eq!(rc.matches("source").count(), 1);

        assert!(install_completions_under(Shell::PowerShell, &home).is_err());
        let _ = std::fs::remove_dir_all(home);
    }

    #[test]
    fn unknown_shell_is_rejected() {
        let err = run_completions_command(Some("nonsense"), false).unwrap_err();
        assert_eq!(err.to_string(), "unknown shell 'nonsense'");
    }
}
