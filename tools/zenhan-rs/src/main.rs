use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};

use clap::{Arg, ArgAction, Command};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use zenhan::{ConvertProfile, Direction, Mode};

const BLUE: &str = "\x1B[1;34m";
const RESET: &str = "\x1B[0m";

fn read_input(input: &mut dyn Read, is_console: bool) -> Result<Vec<u8>, io::Error> {
    let mut buffer = Vec::new();

    if is_console {
        // Read chunks of data when input is from the console
        let mut chunk = [0; 1024];
        while let Ok(bytes_read) = input.read(&mut chunk) {
            if bytes_read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..bytes_read]);
        }
    } else {
        input.read_to_end(&mut buffer)?;
    }

    Ok(buffer)
}

fn is_utf8_label(label: &str) -> bool {
    matches!(label.to_ascii_uppercase().as_str(), "UTF-8" | "UTF8")
}

fn decode_input(buffer: &[u8], in_enc: &str) -> Result<String, io::Error> {
    let encoding = Encoding::for_label(in_enc.as_bytes()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unsupported input encoding: {}", in_enc),
        )
    })?;
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .build(buffer);
    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

fn encode_and_write_output(
    output_bytes: &[u8],
    out_enc: &str,
    output: &mut dyn Write,
) -> Result<(), io::Error> {
    if is_utf8_label(out_enc) {
        // Malformed UTF-8 that passed through conversion is written back verbatim.
        return output.write_all(output_bytes);
    }

    let encoding = Encoding::for_label(out_enc.as_bytes()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unsupported output encoding: {}", out_enc),
        )
    })?;
    let text = String::from_utf8_lossy(output_bytes);
    let (encoded_bytes, _, _) = encoding.encode(&text);
    output.write_all(&encoded_bytes)
}

fn remove_utf8_bom(input: &mut Vec<u8>) {
    // UTF-8 BOM: EF BB BF
    if input.len() >= 3 && &input[0..3] == &[0xEF, 0xBB, 0xBF] {
        input.drain(0..3);
    }
}

/// Merges `--profile` with the explicit flags; flags win.
fn resolve_profile(matches: &clap::ArgMatches) -> Result<ConvertProfile, Box<dyn std::error::Error>> {
    let base = match matches.get_one::<String>("profile") {
        Some(path) => Some(ConvertProfile::from_json_file(path)?),
        None => None,
    };

    let direction = match matches.get_one::<String>("direction") {
        Some(d) => Direction::try_from(d.as_str())?,
        None => match &base {
            Some(p) => p.direction,
            None => return Err("either --direction or --profile is required".into()),
        },
    };

    let mode = match matches.get_one::<String>("mode") {
        Some(m) => Mode::try_from(m.as_str())?,
        None => base.as_ref().map_or(Mode::ALL, |p| p.mode),
    };

    let mut ignore = base.map(|p| p.ignore).unwrap_or_default();
    if let Some(values) = matches.get_many::<String>("ignore") {
        ignore.extend(values.flat_map(|v| v.chars()).map(String::from));
    }

    Ok(ConvertProfile::new(direction, mode).with_ignore(ignore))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("Zenhan Rust")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .help("Read original text from <file>."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write converted text to <file>."),
        )
        .arg(
            Arg::new("direction")
                .short('d')
                .long("direction")
                .value_name("direction")
                .help("Conversion direction: [h2z|z2h]"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("mode")
                .help("Categories to convert, joined by '|' or ',': [ascii|digit|kana|all] (default: all)"),
        )
        .arg(
            Arg::new("ignore")
                .long("ignore")
                .value_name("chars")
                .action(ArgAction::Append)
                .help("Characters to leave unconverted (repeatable)."),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("file")
                .help("Load direction/mode/ignore from a JSON profile; explicit flags override it."),
        )
        .arg(
            Arg::new("in_enc")
                .long("in-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for input: UTF-8|Shift_JIS|EUC-JP|ISO-2022-JP"),
        )
        .arg(
            Arg::new("out_enc")
                .long("out-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for output: UTF-8|Shift_JIS|EUC-JP|ISO-2022-JP"),
        )
        .about(format!(
            "{BLUE}Zenhan Rust: Command Line Zenkaku/Hankaku Converter{RESET}"
        ))
        .get_matches();

    let profile = match resolve_profile(&matches) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("{BLUE}{err}{RESET}");
            std::process::exit(2);
        }
    };

    let input_file = matches.get_one::<String>("input");
    let output_file = matches.get_one::<String>("output");
    let in_enc = matches
        .get_one::<String>("in_enc")
        .map_or("UTF-8", String::as_str);
    let out_enc = matches
        .get_one::<String>("out_enc")
        .map_or("UTF-8", String::as_str);

    let mut input: Box<dyn Read> = match input_file {
        Some(file_name) => Box::new(BufReader::new(File::open(file_name)?)),
        None => {
            if io::stdin().is_terminal() {
                eprintln!("{BLUE}Input text to convert, <ctrl-z> or <ctrl-d> to submit:{RESET}");
            }
            Box::new(io::stdin())
        }
    };

    let is_console = input_file.is_none();
    let mut buffer = read_input(&mut *input, is_console)?;

    if is_utf8_label(in_enc) && !is_utf8_label(out_enc) {
        remove_utf8_bom(&mut buffer);
    }

    let output_bytes = if is_utf8_label(in_enc) {
        profile.apply_bytes(&buffer)
    } else {
        let input_str = decode_input(&buffer, in_enc)?;
        profile.apply(&input_str).into_bytes()
    };

    let mut output = BufWriter::new(match output_file {
        Some(file_name) => Box::new(File::create(file_name)?) as Box<dyn Write>,
        None => Box::new(io::stdout()) as Box<dyn Write>,
    });

    encode_and_write_output(&output_bytes, out_enc, &mut output)?;
    output.flush()?;

    eprintln!(
        "{BLUE}Conversion completed ({} {}): {} -> {}{RESET}",
        profile.direction,
        profile.mode,
        input_file.map_or("<stdin>", String::as_str),
        output_file.map_or("stdout", String::as_str)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Command {
        Command::new("test")
            .arg(Arg::new("direction").short('d'))
            .arg(Arg::new("mode").short('m'))
            .arg(Arg::new("ignore").long("ignore").action(ArgAction::Append))
            .arg(Arg::new("profile").short('p'))
    }

    #[test]
    fn flags_build_profile() {
        let matches = cli().get_matches_from(["test", "-d", "h2z", "-m", "kana", "--ignore", "ｱｲ"]);
        let profile = resolve_profile(&matches).unwrap();
        assert_eq!(profile.direction, Direction::H2z);
        assert_eq!(profile.mode, Mode::KANA);
        assert_eq!(profile.ignore, vec!["ｱ".to_string(), "ｲ".to_string()]);
    }

    #[test]
    fn direction_is_required_without_profile() {
        let matches = cli().get_matches_from(["test", "-m", "all"]);
        assert!(resolve_profile(&matches).is_err());
    }

    #[test]
    fn bom_is_stripped() {
        let mut buf = vec![0xEF, 0xBB, 0xBF, b'a'];
        remove_utf8_bom(&mut buf);
        assert_eq!(buf, b"a");
    }

    #[test]
    fn shift_jis_round_trip() {
        let (sjis, _, _) = encoding_rs::SHIFT_JIS.encode("ｶﾞｯｺｳ");
        let decoded = decode_input(&sjis, "Shift_JIS").unwrap();
        assert_eq!(decoded, "ｶﾞｯｺｳ");

        let mut out = Vec::new();
        encode_and_write_output("ガッコウ".as_bytes(), "Shift_JIS", &mut out).unwrap();
        let (back, _, _) = encoding_rs::SHIFT_JIS.decode(&out);
        assert_eq!(back, "ガッコウ");
    }

    #[test]
    fn utf8_output_keeps_malformed_bytes() {
        let mut out = Vec::new();
        encode_and_write_output(&[0xff, 0xfe], "UTF-8", &mut out).unwrap();
        assert_eq!(out, vec![0xff, 0xfe]);
    }
}
