use anyhow::Result;

fn main() -> Result<()> {
    offlabel_np_cli::run()
}
