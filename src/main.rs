fn main() -> anyhow::Result<()> {
    endscene_rust::run()
}
