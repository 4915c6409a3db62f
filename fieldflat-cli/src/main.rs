fn main() -> anyhow::Result<()> {
    fieldflat_cli::run()
}
