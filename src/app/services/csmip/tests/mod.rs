//! Synthetic CSMIP member fixtures.
//!
//! Builders producing members laid out exactly per the format contract:
//! fixed text header line counts, fixed-width numeric header blocks and
//! count-prefixed payload blocks. Header lines are placed by explicit index
//! so the fixed-line invariants are visible at a glance.


/// Twelve acceleration samples; first/last values are the documented
/// boundary literals.
pub const ACCEL: [f64; 12] = [
    -0.000102, 0.000034, -0.000076, 0.000412, -0.001230, 0.002100, -0.000870, 0.000655,
    -0.000321, 0.000199, -0.000045, 0.000105,
];

pub const VELOC: [f64; 12] = [
    0.000095, 0.000110, 0.000134, -0.000156, 0.000178, -0.000201, 0.000225, -0.000250,
    0.000276, -0.000303, 0.000331, 0.000101,
];

pub const DISPL: [f64; 12] = [
    0.000001, -0.000002, 0.000004, -0.000007, 0.000011, -0.000016, 0.000022, -0.000029,
    0.000037, -0.000046, 0.000056, -0.000067,
];

/// Chunk values into payload lines: 8 per line, fixed field width
pub fn data_block(values: &[f64], width: usize) -> String {
    values
        .iter()
        .map(|value| format!("{:>width$.6}", value, width = width))
        .collect::<Vec<_>>()
        .chunks(8)
        .map(|chunk| chunk.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Integer header block: values 1..=count, 5-char fields, 16 per line
pub fn int_block(count: usize) -> String {
    (1..=count as i64)
        .map(|value| format!("{:>5}", value))
        .collect::<Vec<_>>()
        .chunks(16)
        .map(|chunk| chunk.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Real header block: values i * 0.5, 10-char fields, 8 per line
pub fn real_block(count: usize) -> String {
    (1..=count)
        .map(|value| format!("{:>10.3}", value as f64 * 0.5))
        .collect::<Vec<_>>()
        .chunks(8)
        .map(|chunk| chunk.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn count_line(npts: usize, quantity: &str) -> String {
    format!(
        "{:>8} points of {} data equally spaced at  .005 sec",
        npts, quantity
    )
}

/// The 25-line V2 text header (1-based line numbers in comments)
fn v2_text_header(channel: u32) -> Vec<String> {
    let mut lines = vec![String::new(); 25];
    lines[0] = "Corrected accelerogram 58658-CE58658-N.V2".to_string(); // 1
    lines[1] = "Processed by the California strong motion instrumentation program".to_string();
    lines[4] = "Earthquake of: 04/26/21, 10:09 PDT".to_string(); // 5
    lines[5] = "Station No. 58658   37.8085N, 122.2672W".to_string(); // 6
    lines[6] = "Berkeley - Unnamed Building".to_string(); // 7
    lines[7] = format!(
        "Chan  {0}: 360 Deg  Sta Chn: {0}  Location: Roof level",
        channel
    ); // 8
    lines[10] = "Instr Period = 0.039 sec, Damping = 0.577".to_string(); // 11
    lines[13] = "Peak acceleration = 17.433 cm/sec2 at 5.210 sec".to_string(); // 14
    lines[14] = "Peak velocity = 0.205 cm/sec at 5.940 sec".to_string(); // 15
    lines[15] = "Peak displacement = -0.004 cm at 9.150 sec".to_string(); // 16
    lines[16] = "Initial velocity = 0.095 cm/sec; Initial displacement = -0.002 cm".to_string(); // 17
    lines[21] = count_line(ACCEL.len(), "accel"); // 22
    lines[22] = count_line(VELOC.len(), "veloc"); // 23
    lines[23] = count_line(DISPL.len(), "displ"); // 24
    lines
}

/// The 13-line V1 text header (station name on line 6)
fn v1_text_header(channel: u32) -> Vec<String> {
    let mut lines = vec![String::new(); 13];
    lines[0] = "Uncorrected accelerogram 58658-CE58658-N.V1".to_string(); // 1
    lines[2] = "Earthquake of: 04/26/21, 10:09 PDT".to_string(); // 3
    lines[3] = "Station No. 58658   37.8085N, 122.2672W".to_string(); // 4
    lines[5] = "Berkeley - Unnamed Building".to_string(); // 6
    lines[6] = format!(
        "Chan  {0}: 360 Deg  Sta Chn: {0}  Location: Roof level",
        channel
    ); // 7
    lines[7] = "Instr Period = 0.039 sec, Damping = 0.577".to_string(); // 8
    lines[9] = count_line(ACCEL.len(), "accel"); // 10
    lines
}

/// A complete full-format V2 member
pub fn v2_member(channel: u32) -> String {
    let mut sections = v2_text_header(channel);
    sections.push(int_block(100));
    sections.push(real_block(100));
    for (values, quantity) in [(&ACCEL, "accel"), (&VELOC, "veloc"), (&DISPL, "displ")] {
        sections.push(count_line(values.len(), quantity));
        sections.push(data_block(values, 10));
    }
    sections.join("\n")
}

/// A complete reduced-format V1 member (acceleration only, 9-char fields)
pub fn v1_member(channel: u32) -> String {
    let mut sections = v1_text_header(channel);
    sections.push(int_block(50));
    sections.push(real_block(50));
    sections.push(count_line(ACCEL.len(), "accel"));
    sections.push(data_block(&ACCEL, 9));
    sections.join("\n")
}
