//! The embedded single-page UI hosted by the webview.
//!
//! The page is deliberately dumb: it forwards user events over IPC and
//! exposes a small `window.mdpress` API the Rust side drives with
//! `evaluate_script`. All state lives on the Rust side.

pub fn index_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>{CSS}</style>
</head>
<body class="mode-inline">
    <div class="toolbar">
        <span class="brand">mdpress</span>
        <button id="open-file">Open File</button>
        <button id="toggle-preview">Hide Preview</button>
        <button id="toggle-compact">Mini Present</button>
        <button id="toggle-mode">Present</button>
        <button id="export-deck">Export</button>
    </div>
    <div class="panes">
        <textarea id="markdown-input" spellcheck="false"></textarea>
        <div id="preview-output"></div>
        <div id="compact-view">
            <div id="compact-content"></div>
            <div class="slide-controls">
                <button id="compact-prev">&#9664;</button>
                <span id="compact-number"></span>
                <button id="compact-next">&#9654;</button>
            </div>
        </div>
    </div>
    <div id="presentation-view">
        <div id="slide-content"></div>
        <div class="slide-controls">
            <button id="prev-slide">&#9664;</button>
            <span id="slide-number"></span>
            <button id="next-slide">&#9654;</button>
        </div>
    </div>
    <div id="toast"></div>
    <script>{JS}</script>
</body>
</html>"##
    )
}

const CSS: &str = r##"
* { margin: 0; padding: 0; box-sizing: border-box; }

:root {
    --bg: #1e1e2e;
    --bg-alt: #181825;
    --bg-deep: #11111b;
    --fg: #cdd6f4;
    --fg-dim: #a6adc8;
    --border: #313244;
    --accent: #89b4fa;
}

body {
    font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif;
    background: var(--bg);
    color: var(--fg);
    height: 100vh;
    display: flex;
    flex-direction: column;
    overflow: hidden;
}

.toolbar {
    display: flex;
    align-items: center;
    gap: 8px;
    padding: 8px 12px;
    background: var(--bg-alt);
    border-bottom: 1px solid var(--border);
}

.toolbar .brand {
    font-weight: 600;
    color: var(--accent);
    margin-right: 12px;
}

.toolbar button, .slide-controls button {
    background: var(--bg);
    color: var(--fg);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 6px 12px;
    font-size: 13px;
    cursor: pointer;
}

.toolbar button:hover, .slide-controls button:hover { border-color: var(--accent); }
.toolbar button.active { background: var(--accent); color: var(--bg-deep); }
.slide-controls button:disabled { opacity: 0.35; cursor: default; }

.panes { flex: 1; display: flex; min-height: 0; }

#markdown-input {
    flex: 1;
    background: var(--bg-deep);
    color: var(--fg);
    border: none;
    outline: none;
    resize: none;
    padding: 16px;
    font-family: ui-monospace, "SF Mono", Menlo, Consolas, monospace;
    font-size: 14px;
    line-height: 1.6;
}

#preview-output {
    flex: 1;
    overflow-y: auto;
    padding: 24px 32px;
    border-left: 1px solid var(--border);
}

#compact-view {
    flex: 1;
    display: none;
    flex-direction: column;
    border-left: 1px solid var(--border);
    background: var(--bg-alt);
}

#compact-content { flex: 1; overflow-y: auto; padding: 24px 32px; }

#presentation-view {
    display: none;
    position: fixed;
    inset: 0;
    background: var(--bg-deep);
    z-index: 10;
    flex-direction: column;
}

#slide-content {
    flex: 1;
    overflow: hidden;
    padding: 6vh 8vw;
    font-size: 1.4em;
}

.slide-controls {
    display: flex;
    align-items: center;
    justify-content: center;
    gap: 16px;
    padding: 10px;
    color: var(--fg-dim);
    font-size: 13px;
}

/* View modes: exactly one of the three is active at a time. */
body.preview-hidden #preview-output { display: none; }
body.mode-fullscreen #presentation-view { display: flex; }
body.mode-compact #preview-output { display: none; }
body.mode-compact #compact-view { display: flex; }

#preview-output h1, #compact-content h1, #slide-content h1 {
    margin: 0.4em 0;
    border-bottom: 1px solid var(--border);
    padding-bottom: 0.2em;
}
#preview-output h2, #preview-output h3, #compact-content h2, #slide-content h2 { margin: 0.5em 0; }
#preview-output p, #compact-content p, #slide-content p { margin: 0.6em 0; line-height: 1.6; }
#preview-output ul, #preview-output ol, #compact-content ul, #compact-content ol,
#slide-content ul, #slide-content ol { margin: 0.6em 0 0.6em 1.6em; line-height: 1.6; }
#preview-output pre, #compact-content pre, #slide-content pre {
    background: var(--bg-deep);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 12px;
    overflow-x: auto;
    margin: 0.6em 0;
}
#preview-output code, #compact-content code, #slide-content code {
    font-family: ui-monospace, "SF Mono", Menlo, Consolas, monospace;
    font-size: 0.9em;
}
#preview-output blockquote, #compact-content blockquote, #slide-content blockquote {
    border-left: 4px solid var(--accent);
    padding-left: 12px;
    color: var(--fg-dim);
    margin: 0.6em 0;
}
#preview-output img, #compact-content img, #slide-content img { max-width: 100%; }
#preview-output table, #compact-content table, #slide-content table {
    border-collapse: collapse;
    margin: 0.6em 0;
}
#preview-output th, #preview-output td, #compact-content th, #compact-content td,
#slide-content th, #slide-content td {
    border: 1px solid var(--border);
    padding: 6px 12px;
}
#preview-output hr, #compact-content hr, #slide-content hr {
    border: 0;
    border-top: 2px solid var(--border);
    margin: 1em 0;
}

#toast {
    position: fixed;
    bottom: 24px;
    left: 50%;
    transform: translateX(-50%);
    background: var(--bg-alt);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 10px 18px;
    font-size: 13px;
    opacity: 0;
    transition: opacity 0.25s ease;
    pointer-events: none;
    z-index: 20;
}
#toast.visible { opacity: 0.95; }
"##;

const JS: &str = r##"
function post(msg) {
    window.ipc.postMessage(JSON.stringify(msg));
}

const input = document.getElementById('markdown-input');
const body = document.body;

function presenting() {
    return body.classList.contains('mode-fullscreen') || body.classList.contains('mode-compact');
}

input.addEventListener('input', () => {
    post({ type: 'text-changed', text: input.value });
});

const NAV_KEYS = [
    'ArrowRight', 'ArrowLeft', 'ArrowUp', 'ArrowDown',
    'PageDown', 'PageUp', ' ', 'Home', 'End', 'Escape', 'f', 'F',
];

document.addEventListener('keydown', (e) => {
    if (!presenting()) return;
    // Keep typing in the editor usable while the compact strip is shown.
    if (body.classList.contains('mode-compact') && e.target === input) return;
    if (NAV_KEYS.includes(e.key)) {
        e.preventDefault();
        post({ type: 'key', key: e.key });
    }
});

document.addEventListener('wheel', (e) => {
    if (!presenting()) return;
    if (body.classList.contains('mode-compact') && e.target.closest('#compact-view') === null) return;
    e.preventDefault();
    post({ type: 'wheel', delta_y: e.deltaY });
}, { passive: false });

document.getElementById('open-file').addEventListener('click', () => post({ type: 'open-file' }));
document.getElementById('toggle-preview').addEventListener('click', () => post({ type: 'toggle-preview' }));
document.getElementById('toggle-mode').addEventListener('click', () => post({ type: 'toggle-presentation' }));
document.getElementById('toggle-compact').addEventListener('click', () => post({ type: 'toggle-compact' }));
document.getElementById('export-deck').addEventListener('click', () => post({ type: 'export' }));
document.getElementById('prev-slide').addEventListener('click', () => post({ type: 'prev-slide' }));
document.getElementById('next-slide').addEventListener('click', () => post({ type: 'next-slide' }));
document.getElementById('compact-prev').addEventListener('click', () => post({ type: 'prev-slide' }));
document.getElementById('compact-next').addEventListener('click', () => post({ type: 'next-slide' }));

let toastTimer = null;

window.mdpress = {
    setEditor(text) {
        input.value = text;
    },
    setPreview(html) {
        document.getElementById('preview-output').innerHTML = html;
    },
    showSlide(html, index, total) {
        const label = total > 0 ? (index + 1) + ' / ' + total : '';
        for (const [content, number] of [
            ['slide-content', 'slide-number'],
            ['compact-content', 'compact-number'],
        ]) {
            document.getElementById(content).innerHTML = html;
            document.getElementById(number).textContent = label;
        }
        document.getElementById('prev-slide').disabled = index === 0;
        document.getElementById('compact-prev').disabled = index === 0;
        document.getElementById('next-slide').disabled = index >= total - 1;
        document.getElementById('compact-next').disabled = index >= total - 1;
    },
    setMode(mode) {
        body.classList.remove('mode-inline', 'mode-fullscreen', 'mode-compact');
        body.classList.add('mode-' + mode);
        const toggle = document.getElementById('toggle-mode');
        toggle.textContent = mode === 'fullscreen' ? 'Exit' : 'Present';
        toggle.classList.toggle('active', mode === 'fullscreen');
        const compact = document.getElementById('toggle-compact');
        compact.textContent = mode === 'compact' ? 'Exit Mini' : 'Mini Present';
        compact.classList.toggle('active', mode === 'compact');
        if (mode === 'inline') input.focus();
    },
    setPreviewVisible(visible) {
        body.classList.toggle('preview-hidden', !visible);
        document.getElementById('toggle-preview').textContent =
            visible ? 'Hide Preview' : 'Show Preview';
    },
    toast(message) {
        const el = document.getElementById('toast');
        el.textContent = message;
        el.classList.add('visible');
        clearTimeout(toastTimer);
        toastTimer = setTimeout(() => el.classList.remove('visible'), 1800);
    },
    alertError(message) {
        window.alert(message);
    },
};

post({ type: 'ready' });
"##;
