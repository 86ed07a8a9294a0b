//! Sample HTML for testing and demonstration.
//!
//! [`monitoring_report`] mimics the machine-generated monthly report the
//! edits are written against: a logo `h1`, a title `h2`, a summary
//! `section`, four `.data-table`s (the third is the error time summary),
//! and graph blocks wrapped in `center`.

/// The exception-criteria fragment shipped in `HTML/ExceptionCriteria.html`.
pub fn criteria_fragment() -> &'static str {
    include_str!("../HTML/ExceptionCriteria.html")
}

/// A complete monthly monitoring report.
pub fn monitoring_report() -> &'static str {
    r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Monthly Report</title>
    <style>
        .data-table td { padding: 2px 6px; }
    </style>
</head>
<body>
    <h1 class="logo">Network Monitor</h1>
    <h2>Report for Probe "Azure East" &amp; children</h2>

    <section class="report-summary">
        <p>Report period: 2026-09-01 to 2026-09-30</p>
    </section>

    <table class="data-table" id="uptime-stats">
        <tr><th>Sensor</th><th>Uptime</th></tr>
        <tr><td>Gateway</td><td>99.98%</td></tr>
    </table>

    <table class="data-table" id="downtime-stats">
        <tr><th>Sensor</th><th>Downtime</th></tr>
        <tr><td>Gateway</td><td>0.02%</td></tr>
    </table>

    <table class="data-table" id="error-time-summary">
        <tr><th>Sensor</th><th>Error time</th></tr>
        <tr><td>Gateway</td><td>8m 12s</td></tr>
        <tr><td>SQL Primary</td><td>52m 40s</td></tr>
    </table>

    <table class="data-table" id="sensor-values">
        <tr><th>Sensor</th><th>Average</th></tr>
        <tr><td>Gateway</td><td>12 ms</td></tr>
    </table>

    <center class="graph">
        <h3>Ping Monitor (Gateway)</h3>
        <img src="graphs/ping-gateway.png" alt="ping graph">
    </center>

    <center class="graph">
        <h3>CPU Load (SQL Primary)</h3>
        <img src="graphs/cpu-sql.png" alt="cpu graph">
    </center>

    <center class="graph">
        <h3>Ping Monitor (SQL Primary)</h3>
        <img src="graphs/ping-sql.png" alt="ping graph">
    </center>

    <p class="footer">Generated automatically. Do not reply.</p>
</body>
</html>
"##
}

/// The smallest report every edit accepts.
pub fn minimal_report() -> &'static str {
    r#"<h1>Logo</h1><h2>Title</h2><section>Summary</section>"#
}
