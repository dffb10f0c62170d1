#![no_main]

use claude_x_core::PatternScanner;
use claude_x_db::parse_session_file;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes as a session log: parsing may skip lines but must not panic.
fuzz_target!(|data: &[u8]| {
    let Ok(mut file) = tempfile::NamedTempFile::new() else {
        return;
    };
    if std::io::Write::write_all(&mut file, data).is_err() {
        return;
    }
    let _ = parse_session_file(file.path(), &PatternScanner);
});
