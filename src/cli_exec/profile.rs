use super::*;

pub(super) fn with_app<F>(home: &Path, f: F) -> Result<()>
where
    F: FnOnce(&App) -> Result<()>,
{
    let app = App::open(home)?;
    f(&app)
}

/// Like [`with_app`], but fails early when no usable session is stored.
pub(super) fn with_session<F>(home: &Path, f: F) -> Result<()>
where
    F: FnOnce(&App) -> Result<()>,
{
    with_app(home, |app| {
        app.require_login()?;
        f(app)
    })
}
