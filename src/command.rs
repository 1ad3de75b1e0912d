//! Argument-vector construction for the wrapped binary
//!
//! Pure functions: options in, ordered `Vec<String>` out. The option order
//! is fixed and significant: input, output, content, postcss, minify,
//! config, autoprefixer, poll (watch only), then `--watch` last.

use std::path::PathBuf;

/// The `--postcss` option is tri-state: omitted, bare flag, or config path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postcss {
    Flag,
    Config(PathBuf),
}

/// Recognized options for `build` and `watch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub content: Option<String>,
    pub postcss: Option<Postcss>,
    pub minify: bool,
    pub config: Option<PathBuf>,
    /// Autoprefixer is on by default; only disabling it emits a flag
    pub autoprefixer: bool,
    /// Watch mode only, ignored for one-shot builds
    pub poll: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            content: None,
            postcss: None,
            minify: false,
            config: None,
            autoprefixer: true,
            poll: false,
        }
    }
}

/// Argument vector for a one-shot build or a watch run
///
/// Both modes use the upstream `build` subcommand; watch mode appends
/// `--watch` last and additionally honors `poll`.
pub fn build_args(opts: &BuildOptions, watch: bool) -> Vec<String> {
    let mut args = vec!["build".to_string()];

    if let Some(input) = &opts.input {
        args.push("--input".to_string());
        args.push(input.display().to_string());
    }
    if let Some(output) = &opts.output {
        args.push("--output".to_string());
        args.push(output.display().to_string());
    }
    if let Some(content) = &opts.content {
        args.push("--content".to_string());
        args.push(content.clone());
    }
    match &opts.postcss {
        Some(Postcss::Flag) => args.push("--postcss".to_string()),
        Some(Postcss::Config(path)) => {
            args.push("--postcss".to_string());
            args.push(path.display().to_string());
        }
        None => {}
    }
    if opts.minify {
        args.push("--minify".to_string());
    }
    if let Some(config) = &opts.config {
        args.push("--config".to_string());
        args.push(config.display().to_string());
    }
    if !opts.autoprefixer {
        args.push("--no-autoprefixer".to_string());
    }
    if watch {
        if opts.poll {
            args.push("--poll".to_string());
        }
        args.push("--watch".to_string());
    }

    args
}

/// Argument vector for `init`
pub fn init_args(full: bool, postcss: bool) -> Vec<String> {
    let mut args = vec!["init".to_string()];
    if full {
        args.push("--full".to_string());
    }
    if postcss {
        args.push("--postcss".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> BuildOptions {
        BuildOptions::default()
    }

    #[test]
    fn test_build_no_options() {
        assert_eq!(build_args(&opts(), false), vec!["build"]);
    }

    #[test]
    fn test_build_single_options() {
        let cases: Vec<(BuildOptions, Vec<&str>)> = vec![
            (
                BuildOptions {
                    input: Some(PathBuf::from("i")),
                    ..opts()
                },
                vec!["--input", "i"],
            ),
            (
                BuildOptions {
                    output: Some(PathBuf::from("o")),
                    ..opts()
                },
                vec!["--output", "o"],
            ),
            (
                BuildOptions {
                    content: Some("c".to_string()),
                    ..opts()
                },
                vec!["--content", "c"],
            ),
            (
                BuildOptions {
                    postcss: Some(Postcss::Flag),
                    ..opts()
                },
                vec!["--postcss"],
            ),
            (
                BuildOptions {
                    postcss: Some(Postcss::Config(PathBuf::from("p"))),
                    ..opts()
                },
                vec!["--postcss", "p"],
            ),
            (
                BuildOptions {
                    minify: true,
                    ..opts()
                },
                vec!["--minify"],
            ),
            (
                BuildOptions {
                    config: Some(PathBuf::from("c")),
                    ..opts()
                },
                vec!["--config", "c"],
            ),
            (
                BuildOptions {
                    autoprefixer: false,
                    ..opts()
                },
                vec!["--no-autoprefixer"],
            ),
        ];

        for (options, expected) in cases {
            let args = build_args(&options, false);
            assert_eq!(args[0], "build");
            assert_eq!(args[1..], expected[..], "options: {:?}", options);
        }
    }

    #[test]
    fn test_build_option_order_is_fixed() {
        let options = BuildOptions {
            input: Some(PathBuf::from("i")),
            minify: true,
            ..opts()
        };
        assert_eq!(
            build_args(&options, false),
            vec!["build", "--input", "i", "--minify"]
        );

        let options = BuildOptions {
            input: Some(PathBuf::from("in.css")),
            output: Some(PathBuf::from("out.css")),
            content: Some("src/**/*.html".to_string()),
            postcss: Some(Postcss::Flag),
            minify: true,
            config: Some(PathBuf::from("tw.config.js")),
            autoprefixer: false,
            poll: false,
        };
        assert_eq!(
            build_args(&options, false),
            vec![
                "build",
                "--input",
                "in.css",
                "--output",
                "out.css",
                "--content",
                "src/**/*.html",
                "--postcss",
                "--minify",
                "--config",
                "tw.config.js",
                "--no-autoprefixer",
            ]
        );
    }

    #[test]
    fn test_watch_appends_watch_last() {
        assert_eq!(build_args(&opts(), true), vec!["build", "--watch"]);

        let options = BuildOptions {
            input: Some(PathBuf::from("i")),
            ..opts()
        };
        assert_eq!(
            build_args(&options, true),
            vec!["build", "--input", "i", "--watch"]
        );
    }

    #[test]
    fn test_watch_poll() {
        let options = BuildOptions {
            poll: true,
            ..opts()
        };
        assert_eq!(build_args(&options, true), vec!["build", "--poll", "--watch"]);

        // poll is a watch-only option, ignored in one-shot builds
        assert_eq!(build_args(&options, false), vec!["build"]);
    }

    #[test]
    fn test_init_args() {
        assert_eq!(init_args(false, false), vec!["init"]);
        assert_eq!(init_args(true, false), vec!["init", "--full"]);
        assert_eq!(init_args(false, true), vec!["init", "--postcss"]);
        assert_eq!(init_args(true, true), vec!["init", "--full", "--postcss"]);
    }
}
