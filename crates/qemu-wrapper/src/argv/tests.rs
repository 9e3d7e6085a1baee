use super::*;
use proptest::prelude::*;

fn os(items: &[&str]) -> Vec<OsString> {
    items.iter().map(OsString::from).collect()
}

fn cfg() -> LaunchConfig {
    LaunchConfig::new("/usr/bin/qemu-arm-static0", "arm1176")
}

#[test]
fn injects_pair_before_user_arguments() {
    // wrapper --sysroot=/target prog
    let v = ArgVector::build(&cfg(), os(&["wrapper", "--sysroot=/target", "prog"]));
    assert_eq!(
        v.as_slice(),
        os(&["wrapper", "-cpu", "arm1176", "--sysroot=/target", "prog"]).as_slice()
    );
    assert_eq!(v.passthrough(), os(&["--sysroot=/target", "prog"]).as_slice());
}

#[test]
fn program_name_only() {
    let v = ArgVector::build(&cfg(), os(&["wrapper"]));
    assert_eq!(v.as_slice(), os(&["wrapper", "-cpu", "arm1176"]).as_slice());
    assert!(v.passthrough().is_empty());
    assert_eq!(v.len(), 3);
}

#[test]
fn user_cpu_flag_is_passed_through_after_injected_pair() {
    // The emulator decides which -cpu wins; we only guarantee ordering.
    let v = ArgVector::build(&cfg(), os(&["wrapper", "-cpu", "cortex-a9"]));
    assert_eq!(
        v.as_slice(),
        os(&["wrapper", "-cpu", "arm1176", "-cpu", "cortex-a9"]).as_slice()
    );
}

#[test]
fn argv0_is_the_invoked_name_not_the_target() {
    let v = ArgVector::build(&cfg(), os(&["/usr/bin/qemu-arm-static", "ls"]));
    assert_eq!(v.argv0(), OsStr::new("/usr/bin/qemu-arm-static"));
    assert_eq!(v.args(), os(&["-cpu", "arm1176", "ls"]).as_slice());
}

#[test]
fn empty_input_falls_back_to_target_path() {
    let v = ArgVector::build(&cfg(), Vec::<OsString>::new());
    assert_eq!(
        v.as_slice(),
        os(&["/usr/bin/qemu-arm-static0", "-cpu", "arm1176"]).as_slice()
    );
}

#[test]
fn non_utf8_arguments_survive() {
    use std::os::unix::ffi::OsStringExt;
    let raw = OsString::from_vec(vec![0x66, 0x6f, 0xff, 0x6f]);
    let v = ArgVector::build(&cfg(), vec![OsString::from("w"), raw.clone()]);
    assert_eq!(v.passthrough(), &[raw]);
    assert_eq!(v.to_lossy_strings()[3], "fo\u{fffd}o");
}

proptest! {
    #[test]
    fn layout_holds_for_any_input(args in proptest::collection::vec(".*", 1..12)) {
        let original: Vec<OsString> = args.iter().map(OsString::from).collect();
        let v = ArgVector::build(&cfg(), original.clone());
        prop_assert_eq!(v.len(), original.len() + INJECTED);
        prop_assert_eq!(v.argv0(), original[0].as_os_str());
        prop_assert_eq!(&v.as_slice()[1], &OsString::from("-cpu"));
        prop_assert_eq!(&v.as_slice()[2], &OsString::from("arm1176"));
        prop_assert_eq!(v.passthrough(), &original[1..]);
    }

    #[test]
    fn injected_pair_tracks_config_only(
        model in "[a-z0-9-]{1,16}",
        args in proptest::collection::vec("[ -~]*", 1..6),
    ) {
        let cfg = LaunchConfig::new("/bin/true", model.clone());
        let original: Vec<OsString> = args.iter().map(OsString::from).collect();
        let v = ArgVector::build(&cfg, original);
        prop_assert_eq!(
            &v.as_slice()[1..3],
            &[OsString::from("-cpu"), OsString::from(model)][..]
        );
    }
}
