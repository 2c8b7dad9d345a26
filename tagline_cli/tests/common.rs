use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn tagline_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("tagline"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
