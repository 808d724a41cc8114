//! Interactive demo page served at `/`.

pub const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Pulse - Interaction Telemetry Demo</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 0; background: #101418; color: #e6e8ea; }
        .container { max-width: 960px; margin: 0 auto; padding: 2rem; }
        .title { margin: 0 0 0.25rem; }
        .subtitle { color: #8a939c; margin: 0 0 2rem; }
        .stats-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin-bottom: 2rem; }
        .stat-card { background: #1a2027; border-radius: 8px; padding: 1rem; }
        .stat-card h3 { margin: 0 0 0.5rem; font-size: 0.8rem; color: #8a939c; text-transform: uppercase; }
        .stat-number { font-size: 1.6rem; font-weight: 600; }
        .zones { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 2rem; }
        .click-zone { background: #1a2027; border: 1px solid #2a323c; border-radius: 8px; padding: 1.5rem; cursor: pointer; }
        .click-zone:hover { border-color: #4a90d9; }
        .btn { background: #4a90d9; color: #fff; border: none; border-radius: 6px; padding: 0.6rem 1.2rem; cursor: pointer; }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1 class="title">Pulse Interaction Demo</h1>
            <p class="subtitle">Click anywhere to generate telemetry data</p>
        </header>

        <div class="stats-grid">
            <div class="stat-card"><h3>Total Clicks</h3><span class="stat-number" id="click-count">0</span></div>
            <div class="stat-card"><h3>Cursor</h3><span class="stat-number" id="cursor-coords">0, 0</span></div>
            <div class="stat-card"><h3>Active Users</h3><span class="stat-number" id="active-users">0</span></div>
            <div class="stat-card"><h3>Page Views</h3><span class="stat-number" id="page-views">0</span></div>
        </div>

        <div class="zones">
            <div class="click-zone" id="zone-1"><h2>Zone Alpha</h2><p>Detailed click analytics</p></div>
            <div class="click-zone" id="zone-2"><h2>Zone Beta</h2><p>Performance metrics</p></div>
            <div class="click-zone" id="zone-3"><h2>Zone Gamma</h2><p>Interaction patterns</p></div>
        </div>

        <button class="btn" id="generate-event">Generate Custom Event</button>
    </div>

    <script>
        const sessionId = 'sess_' + Math.random().toString(36).slice(2);

        function track(event) {
            event.session_id = sessionId;
            event.page_url = window.location.href;
            fetch('/api/track', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(event),
            }).catch(() => {});
        }

        document.addEventListener('click', (e) => {
            track({
                event_type: 'click',
                cursor_x: e.clientX,
                cursor_y: e.clientY,
                viewport_x: window.innerWidth,
                viewport_y: window.innerHeight,
                element_id: e.target.id || '',
                element_type: e.target.tagName.toLowerCase(),
                element_text: (e.target.textContent || '').slice(0, 64),
            });
        });

        let lastMove = 0;
        document.addEventListener('mousemove', (e) => {
            document.getElementById('cursor-coords').textContent = e.clientX + ', ' + e.clientY;
            const now = Date.now();
            if (now - lastMove < 250) return;
            lastMove = now;
            track({ event_type: 'mousemove', cursor_x: e.clientX, cursor_y: e.clientY });
        });

        window.addEventListener('scroll', () => {
            track({ event_type: 'scroll', scroll_x: window.scrollX, scroll_y: window.scrollY });
        });

        document.getElementById('generate-event').addEventListener('click', (e) => {
            e.stopPropagation();
            track({
                event_type: 'custom',
                element_id: 'generate-event',
                custom: { source: 'demo-button', count: 1, manual: true },
            });
        });

        async function refreshStats() {
            try {
                const res = await fetch('/api/health');
                const health = await res.json();
                document.getElementById('click-count').textContent = health.total_clicks;
                document.getElementById('active-users').textContent = health.active_users;
                document.getElementById('page-views').textContent = health.page_views;
            } catch {}
        }
        refreshStats();
        setInterval(refreshStats, 2000);
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_posts_to_the_track_endpoint() {
        assert!(PAGE.contains("/api/track"));
        assert!(PAGE.contains("/api/health"));
        assert!(PAGE.contains("event_type: 'click'"));
    }
}
