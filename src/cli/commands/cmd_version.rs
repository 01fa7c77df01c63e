use clap::Args;
use clap::crate_version;

#[derive(Args, Debug)]
pub struct VersionCommand;

pub fn execute(_action: &VersionCommand) {
    println!("tidemark version: {}", crate_version!());
}
