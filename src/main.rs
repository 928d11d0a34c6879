fn main() -> std::process::ExitCode {
    cdss_risk_lib::run()
}
