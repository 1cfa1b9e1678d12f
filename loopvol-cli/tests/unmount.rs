mod common;

#[test]
fn test_unmount_missing_dir_is_success() {
    let mut ctx = common::loopvol();
    let mount_dir = ctx.path("never/created");

    ctx.cmd
        .args(["unmount", mount_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout("{\"status\":\"Success\"}\n");

    assert!(!mount_dir.exists(), "unmount must not create the directory");
}

#[test]
fn test_unmount_is_repeatable_on_missing_dir() {
    let ctx = common::loopvol();
    let mount_dir = ctx.path("gone");

    for _ in 0..2 {
        ctx.new_cmd()
            .args(["unmount", mount_dir.to_str().unwrap()])
            .assert()
            .success();
    }
}

#[test]
fn test_unmount_unmounted_dir_fails() {
    let mut ctx = common::loopvol();
    let mount_dir = ctx.path("plain-dir");
    std::fs::create_dir_all(&mount_dir).unwrap();

    let output = ctx
        .cmd
        .args(["unmount", mount_dir.to_str().unwrap()])
        .assert()
        .code(1);

    let v = common::response(&output.get_output().stdout);
    assert_eq!(v["status"], "Failure");
    assert!(!v["message"].as_str().unwrap().is_empty());
    assert!(mount_dir.exists(), "unmount must never remove the directory");
}
