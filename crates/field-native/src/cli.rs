use field_core::AttractorMode;

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Run the CPU stepper for this many ticks instead of opening a window.
    pub headless: Option<u64>,
    pub mode: AttractorMode,
    pub light: bool,
    pub grid_width: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            headless: None,
            mode: AttractorMode::Thomas,
            light: false,
            grid_width: None,
        }
    }
}

pub const USAGE: &str =
    "usage: field-native [--headless <ticks>] [--mode <0-4>] [--grid <width>] [--light]";

fn value<'a>(flag: &str, it: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<&'a str> {
    it.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} needs a value\n{USAGE}"))
}

pub fn parse<'a>(args: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg {
            "--headless" => opts.headless = Some(value(arg, &mut it)?.parse()?),
            "--mode" => opts.mode = AttractorMode::from_id(value(arg, &mut it)?.parse()?)?,
            "--grid" => opts.grid_width = Some(value(arg, &mut it)?.parse()?),
            "--light" => opts.light = true,
            other => anyhow::bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_opens_a_dark_thomas_window() {
        assert_eq!(parse([] as [&str; 0]).unwrap(), Options::default());
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse(["--headless", "200", "--mode", "4", "--grid", "64", "--light"]).unwrap();
        assert_eq!(opts.headless, Some(200));
        assert_eq!(opts.mode, AttractorMode::Singularity);
        assert_eq!(opts.grid_width, Some(64));
        assert!(opts.light);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(["--mode", "9"]).is_err());
        assert!(parse(["--headless"]).is_err());
        assert!(parse(["--fast"]).is_err());
    }
}
