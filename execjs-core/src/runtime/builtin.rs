//! Runtimes registered by default, in auto-detection order

use super::{EmbeddedRuntime, Runtime, TempSettings};
use std::sync::Arc;

#[cfg(feature = "process")]
use super::{Encoding, ExternalRuntime};
#[cfg(feature = "process")]
use crate::probe::CommandSpec;

pub(crate) const NODE_RUNNER: &str = include_str!("runners/node.js");
pub(crate) const JSC_RUNNER: &str = include_str!("runners/jsc.js");
pub(crate) const SPIDERMONKEY_RUNNER: &str = include_str!("runners/spidermonkey.js");
pub(crate) const JSCRIPT_RUNNER: &str = include_str!("runners/jscript.js");
pub(crate) const PHANTOM_RUNNER: &str = include_str!("runners/phantom.js");

const JSC_PATH: &str = "/System/Library/Frameworks/JavaScriptCore.framework/Versions/A/Resources/jsc";

#[cfg_attr(not(feature = "process"), allow(unused_variables))]
pub(crate) fn builtin_runtimes(temp: &TempSettings) -> Vec<(&'static str, Arc<dyn Runtime>)> {
    let mut runtimes: Vec<(&'static str, Arc<dyn Runtime>)> =
        vec![("V8", Arc::new(EmbeddedRuntime::new()))];

    #[cfg(feature = "process")]
    {
        let external = |runtime: ExternalRuntime| -> Arc<dyn Runtime> {
            Arc::new(runtime.with_temp_settings(temp.clone()))
        };

        runtimes.push((
            "Node",
            external(ExternalRuntime::new(
                "Node.js (V8)",
                ["nodejs", "node"],
                NODE_RUNNER,
            )),
        ));
        runtimes.push((
            "JavaScriptCore",
            external(ExternalRuntime::new("JavaScriptCore", [JSC_PATH], JSC_RUNNER)),
        ));

        let spidermonkey = external(ExternalRuntime::new(
            "SpiderMonkey",
            ["js"],
            SPIDERMONKEY_RUNNER,
        ));
        runtimes.push(("SpiderMonkey", Arc::clone(&spidermonkey)));
        runtimes.push(("Spidermonkey", spidermonkey));

        runtimes.push((
            "JScript",
            external(
                ExternalRuntime::new(
                    "JScript",
                    [CommandSpec::new("cscript").with_args(["//E:jscript", "//Nologo"])],
                    JSCRIPT_RUNNER,
                )
                .with_encoding(Encoding::Ascii),
            ),
        ));

        for (name, program) in [("PhantomJS", "phantomjs"), ("SlimerJS", "slimerjs")] {
            runtimes.push((
                name,
                external(ExternalRuntime::new(name, [program], PHANTOM_RUNNER)),
            ));
        }
    }

    runtimes
}
