fn main() -> anyhow::Result<()> {
    countdowns::cli::run()
}
