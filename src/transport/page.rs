//! HTML page for the chat web UI

pub const CHAT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AstraRAG</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: #0f172a;
            color: #e2e8f0;
            display: flex;
            min-height: 100vh;
        }

        aside {
            width: 280px;
            background: #1e293b;
            border-right: 1px solid #334155;
            padding: 24px;
        }

        aside h2 { font-size: 1.1rem; margin-bottom: 16px; }
        aside h3 { font-size: 0.95rem; margin: 24px 0 8px; color: #94a3b8; }
        aside p { font-size: 0.875rem; line-height: 1.5; color: #cbd5e1; }

        .status { padding: 10px 12px; border-radius: 8px; font-size: 0.875rem; margin-bottom: 8px; }
        .status.connected { background: #064e3b; color: #6ee7b7; }
        .status.degraded { background: #713f12; color: #fde68a; }
        .status.unreachable { background: #7f1d1d; color: #fecaca; }
        .hint { font-size: 0.8rem; color: #94a3b8; }

        main {
            flex: 1;
            max-width: 820px;
            margin: 0 auto;
            padding: 24px;
            display: flex;
            flex-direction: column;
        }

        h1 {
            font-size: 1.8rem;
            background: linear-gradient(135deg, #3b82f6 0%, #8b5cf6 100%);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
            margin-bottom: 20px;
        }

        #turns { flex: 1; display: flex; flex-direction: column; gap: 12px; }

        .turn {
            border-radius: 12px;
            padding: 14px 18px;
            line-height: 1.5;
            white-space: pre-wrap;
            border: 1px solid #334155;
        }
        .turn.user { background: #1e3a8a; align-self: flex-end; max-width: 80%; }
        .turn.assistant { background: #1e293b; }
        .turn pre { background: #0f172a; padding: 8px; border-radius: 6px; margin: 6px 0; }
        .sources { margin-top: 10px; font-size: 0.875rem; color: #93c5fd; }
        details { margin-top: 8px; font-size: 0.85rem; color: #94a3b8; }
        details summary { cursor: pointer; }

        form { display: flex; gap: 10px; margin-top: 20px; }
        input {
            flex: 1;
            padding: 12px 14px;
            border-radius: 8px;
            border: 1px solid #334155;
            background: #1e293b;
            color: #e2e8f0;
            font-size: 1rem;
        }
        button {
            background: #3b82f6;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 8px;
            cursor: pointer;
            font-weight: 600;
        }
        button:disabled, input:disabled { opacity: 0.6; cursor: wait; }
        .thinking { color: #94a3b8; font-style: italic; }
    </style>
</head>
<body>
    <aside>
        <h2>Connection Status</h2>
        <div id="backend-status" class="status">Checking backend...</div>
        <div id="backend-hint" class="hint"></div>
        <h3>About</h3>
        <p>AstraRAG is an Agentic RAG chatbot that uses retrieval-augmented generation to answer questions based on your documents.</p>
    </aside>
    <main>
        <h1>AstraRAG - Agentic RAG Chatbot</h1>
        <div id="turns"></div>
        <form id="chat-form">
            <input id="chat-input" type="text" placeholder="Ask Chatbot..." autocomplete="off">
            <button id="chat-send" type="submit">Send</button>
        </form>
    </main>
    <script>
        let sessionId = null;
        const turnsEl = document.getElementById('turns');
        const form = document.getElementById('chat-form');
        const input = document.getElementById('chat-input');
        const send = document.getElementById('chat-send');

        function escapeHtml(text) {
            return text
                .replace(/&/g, '&amp;')
                .replace(/</g, '&lt;')
                .replace(/>/g, '&gt;')
                .replace(/"/g, '&quot;')
                .replace(/'/g, '&#x27;');
        }

        function markdown(text) {
            return escapeHtml(text)
                .replace(/```[a-z]*\n([\s\S]*?)```/g, '<pre>$1</pre>')
                .replace(/\*\*([^*]+)\*\*/g, '<strong>$1</strong>')
                .replace(/`([^`]+)`/g, '<code>$1</code>');
        }

        function renderTurn(turn) {
            const el = document.createElement('div');
            el.className = 'turn ' + turn.role;
            el.innerHTML = markdown(turn.content);
            if (turn.role === 'assistant') {
                const sources = turn.sources || [];
                if (sources.length > 0) {
                    const s = document.createElement('div');
                    s.className = 'sources';
                    s.innerHTML = '<strong>Sources:</strong> ' + escapeHtml(sources.join(', '));
                    el.appendChild(s);
                }
                if (turn.tool_used || turn.rationale) {
                    const d = document.createElement('details');
                    d.innerHTML = '<summary>Show details (tool &amp; rationale)</summary>'
                        + '<div><strong>Tool Used:</strong> ' + escapeHtml(turn.tool_used || 'N/A') + '</div>'
                        + '<div><strong>Rationale:</strong> ' + escapeHtml(turn.rationale || 'N/A') + '</div>';
                    el.appendChild(d);
                }
            }
            return el;
        }

        function render(turns) {
            turnsEl.replaceChildren(...turns.map(renderTurn));
            window.scrollTo(0, document.body.scrollHeight);
        }

        async function checkBackend() {
            const statusEl = document.getElementById('backend-status');
            const hintEl = document.getElementById('backend-hint');
            try {
                const res = await fetch('/api/backend-health');
                const body = await res.json();
                statusEl.className = 'status ' + body.status.state;
                statusEl.textContent = body.summary;
                hintEl.textContent = body.hint || '';
            } catch (e) {
                statusEl.className = 'status unreachable';
                statusEl.textContent = 'Chat UI server not reachable';
            }
        }

        async function startSession() {
            const res = await fetch('/api/sessions', { method: 'POST' });
            const body = await res.json();
            sessionId = body.id;
        }

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            const content = input.value.trim();
            if (!content || !sessionId) return;

            input.value = '';
            input.disabled = true;
            send.disabled = true;

            const pending = turnsEl.appendChild(renderTurn({ role: 'user', content }));
            const thinking = document.createElement('div');
            thinking.className = 'turn assistant thinking';
            thinking.textContent = 'Thinking...';
            turnsEl.appendChild(thinking);

            try {
                const res = await fetch('/api/sessions/' + sessionId + '/messages', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ content }),
                });
                const body = await res.json();
                if (res.ok) {
                    render(body.turns);
                } else {
                    pending.remove();
                    thinking.textContent = body.error || 'Request rejected';
                }
            } catch (e) {
                thinking.textContent = 'Chat UI server not reachable';
            } finally {
                input.disabled = false;
                send.disabled = false;
                input.focus();
            }
        });

        window.addEventListener('beforeunload', () => {
            if (sessionId) {
                fetch('/api/sessions/' + sessionId, { method: 'DELETE', keepalive: true });
            }
        });

        checkBackend();
        startSession();
    </script>
</body>
</html>
"#;
