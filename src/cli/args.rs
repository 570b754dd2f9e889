use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// `-h` and `-v` keep their pycdas meanings, so clap's own help/version flags are off.
#[derive(Parser, Debug)]
#[command(
    name = "pycdas",
    about = "Disassemble compiled Python modules",
    override_usage = "pycdas [options] input.pyc",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Compiled module (.pyc), or a raw code object with -c. The last one given is used.
    #[arg(value_name = "input.pyc", action = ArgAction::Append)]
    pub inputs: Vec<PathBuf>,

    /// Write output to <filename> (default: stdout)
    #[arg(short = 'o', value_name = "filename")]
    pub output: Option<PathBuf>,

    /// Specify loading a compiled code object. Requires the version to be set
    #[arg(short = 'c', default_value_t = false)]
    pub marshalled: bool,

    /// Specify a Python version for loading a compiled code object
    #[arg(short = 'v', value_name = "x.y")]
    pub version: Option<String>,

    /// Show extra fields in PyCode object dumps
    #[arg(long = "pycode-extra", default_value_t = false)]
    pub pycode_extra: bool,

    /// Don't suppress CACHE instructions in Python 3.11+ disassembly
    #[arg(long = "show-caches", default_value_t = false)]
    pub show_caches: bool,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Show this help text and then exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,
}

impl CliArgs {
    pub fn input(&self) -> Option<&PathBuf> {
        self.inputs.last()
    }
}

/// Whether `-h`/`--help` comes before the first unknown flag. Arguments are
/// scanned in order, so a later bad flag does not stop the help text.
pub fn help_requested<I: IntoIterator<Item = OsString>>(args: I) -> bool {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.to_str() {
            Some("-h" | "--help") => return true,
            Some("-o" | "-v") => {
                args.next();
            }
            Some("-c" | "--pycode-extra" | "--show-caches" | "--log") => {}
            Some(flag) if flag.starts_with('-') => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(args: &[&str]) -> bool {
        help_requested(args.iter().map(OsString::from))
    }

    #[test]
    fn help_before_unknown_flag_wins() {
        assert!(scan(&["--help", "--bogus"]));
        assert!(scan(&["mod.pyc", "-c", "-h"]));
        assert!(!scan(&["--bogus", "--help"]));
        assert!(!scan(&["mod.pyc"]));
    }

    #[test]
    fn option_values_are_not_flags() {
        assert!(scan(&["-o", "--weird-name", "--help"]));
        assert!(!scan(&["-o", "--help"]));
    }

    #[test]
    fn last_input_wins() {
        let args = CliArgs::try_parse_from(["pycdas", "a.pyc", "-c", "b.pyc"]).unwrap();
        assert_eq!(args.input(), Some(&PathBuf::from("b.pyc")));
        assert!(args.marshalled);
    }
}
