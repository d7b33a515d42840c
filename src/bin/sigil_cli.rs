#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("sigil_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use sigil_engine::geom::{Point2, Point3, Shape};
    use sigil_engine::parse::{parse_path_data, parse_svg_document};
    use sigil_engine::sigil::{Recognizer, SIGNATURE_RESOLUTION, SigilRegistry, flatten_stroke};
    use std::fmt::Write as _;
    use std::fs;
    use std::path::Path;

    const POINT_DECIMALS: usize = 6;

    const USAGE: &str = r#"sigil_cli (sigil-engine)

USAGE:
  sigil_cli signature <path-data>
  sigil_cli points <path-data> [--step <d>]
  sigil_cli svg <file> [--step <d>]
  sigil_cli stroke <file> [--match <svg>]...

COMMANDS:
  signature   Print the feature signature of an SVG path-data string
  points      Print the normalized, resampled outline (one `x y` pair per line)
  svg         Print signature and outline of every <path> in an SVG file
  stroke      Flatten a 3D stroke (one `x y z` triple per line) and print its signature

OPTIONS:
  --step <d>     Resampling distance in the unit box (default 0.05)
  --match <svg>  Register an SVG file as a sigil named after its file stem;
                 the stroke is matched against every registered sigil
  -h, --help     Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "signature" => cmd_signature(&mut args),
            "points" => cmd_points(&mut args),
            "svg" => cmd_svg(&mut args),
            "stroke" => cmd_stroke(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_signature(args: &mut Args) -> Result<(), String> {
        let path_data = args.next().ok_or("missing path data")?;
        let shape = normalized_shape(&path_data)?;
        let points = shape
            .resample(SIGNATURE_RESOLUTION)
            .map_err(|e| format!("resample: {e}"))?;
        println!("{}", Recognizer::default().recognize(&points));
        Ok(())
    }

    fn cmd_points(args: &mut Args) -> Result<(), String> {
        let path_data = args.next().ok_or("missing path data")?;
        let step = parse_step_options(args)?;
        let shape = normalized_shape(&path_data)?;
        let points = shape.resample(step).map_err(|e| format!("resample: {e}"))?;
        print!("{}", format_points(&points));
        eprintln!("points={} step={step}", points.len());
        Ok(())
    }

    fn cmd_svg(args: &mut Args) -> Result<(), String> {
        let file = args.next().ok_or("missing svg file")?;
        let step = parse_step_options(args)?;
        let text = read_text_file(Path::new(&file))?;
        let shape = parse_svg_document(&text)
            .map_err(|e| format!("{file}: {e}"))?
            .normalized()
            .map_err(|e| format!("{file}: {e}"))?;

        let signature_points = shape
            .resample(SIGNATURE_RESOLUTION)
            .map_err(|e| format!("resample: {e}"))?;
        let points = shape.resample(step).map_err(|e| format!("resample: {e}"))?;

        println!("# signature: {}", Recognizer::default().recognize(&signature_points));
        print!("{}", format_points(&points));
        eprintln!(
            "{file}: paths={} segments={} points={}",
            shape.paths().len(),
            shape.segment_count(),
            points.len()
        );
        Ok(())
    }

    fn cmd_stroke(args: &mut Args) -> Result<(), String> {
        let file = args.next().ok_or("missing stroke file")?;
        let mut registry = SigilRegistry::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--match" => {
                    let svg_file = args.value("--match")?;
                    let path = Path::new(&svg_file);
                    let name = path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .ok_or_else(|| format!("cannot derive a sigil name from {svg_file}"))?
                        .to_owned();
                    let svg = read_text_file(path)?;
                    let sigil = registry
                        .register_svg(&name, &svg)
                        .map_err(|e| format!("{svg_file}: {e}"))?;
                    eprintln!("registered {} as [{}]", sigil.name(), sigil.signature());
                }
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let text = read_text_file(Path::new(&file))?;
        let stroke = parse_stroke(&text)?;
        let flat = flatten_stroke(&stroke).map_err(|e| format!("{file}: {e}"))?;
        println!("{}", registry.recognizer().recognize(&flat));

        if !registry.is_empty() {
            match registry.match_points(&flat) {
                Some(sigil) => println!("match: {}", sigil.name()),
                None => println!("match: none"),
            }
        }
        Ok(())
    }

    fn parse_step_options(args: &mut Args) -> Result<f64, String> {
        let mut step = SIGNATURE_RESOLUTION;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--step" => {
                    let raw = args.value("--step")?;
                    step = raw
                        .parse::<f64>()
                        .map_err(|_| format!("invalid step `{raw}`"))?;
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }
        Ok(step)
    }

    fn normalized_shape(path_data: &str) -> Result<Shape, String> {
        let path = parse_path_data(path_data).map_err(|e| format!("parse: {e}"))?;
        Shape::from(path)
            .normalized()
            .map_err(|e| format!("normalize: {e}"))
    }

    fn parse_stroke(text: &str) -> Result<Vec<Point3>, String> {
        let mut points = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let values = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .map(str::parse::<f64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("line {}: {e}", line_no + 1))?;
            let &[x, y, z] = values.as_slice() else {
                return Err(format!(
                    "line {}: expected 3 coordinates, got {}",
                    line_no + 1,
                    values.len()
                ));
            };
            points.push(Point3::new(x, y, z));
        }
        Ok(points)
    }

    fn format_points(points: &[Point2]) -> String {
        let mut out = String::new();
        for point in points {
            let _ = writeln!(
                out,
                "{:.prec$} {:.prec$}",
                point.x,
                point.y,
                prec = POINT_DECIMALS
            );
        }
        out
    }

    fn read_text_file(path: &Path) -> Result<String, String> {
        fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
