use sitekit_core::SiteData;

const APP_JS: &str = r##"(function () {
  'use strict';

  function ready(fn) {
    if (document.readyState !== 'loading') fn();
    else document.addEventListener('DOMContentLoaded', fn);
  }

  function initNav() {
    var toggle = document.querySelector('.nav-toggle');
    var nav = document.getElementById('site-nav');
    if (!toggle || !nav) return;
    toggle.addEventListener('click', function () {
      var open = nav.classList.toggle('open');
      toggle.setAttribute('aria-expanded', open ? 'true' : 'false');
    });
    nav.querySelectorAll('a').forEach(function (link) {
      link.addEventListener('click', function () {
        nav.classList.remove('open');
        toggle.setAttribute('aria-expanded', 'false');
      });
    });
  }

  function initSmoothScroll() {
    var header = document.querySelector('.site-header');
    document.querySelectorAll('a[href^="#"]').forEach(function (link) {
      link.addEventListener('click', function (event) {
        var id = link.getAttribute('href').slice(1);
        if (!id) return;
        var target = document.getElementById(id);
        if (!target) return;
        event.preventDefault();
        var offset = STICKY_HEADER && header ? header.offsetHeight : 0;
        var top = target.getBoundingClientRect().top + window.pageYOffset - offset;
        window.scrollTo({ top: top, behavior: 'smooth' });
        history.replaceState(null, '', '#' + id);
      });
    });
  }

  function initAccordions() {
    document.querySelectorAll('.el-accordion').forEach(function (accordion) {
      var multiple = accordion.getAttribute('data-multiple') === 'true';
      var headers = accordion.querySelectorAll('.accordion-header');
      headers.forEach(function (header) {
        header.addEventListener('click', function () {
          var panel = document.getElementById(header.getAttribute('aria-controls'));
          var open = header.getAttribute('aria-expanded') === 'true';
          if (!multiple) {
            headers.forEach(function (other) {
              other.setAttribute('aria-expanded', 'false');
              var otherPanel = document.getElementById(other.getAttribute('aria-controls'));
              if (otherPanel) otherPanel.hidden = true;
            });
          }
          header.setAttribute('aria-expanded', open ? 'false' : 'true');
          if (panel) panel.hidden = open;
        });
      });
    });
  }

  function initTabs() {
    document.querySelectorAll('.el-tabs').forEach(function (tabs) {
      var buttons = tabs.querySelectorAll('.tab-button');
      buttons.forEach(function (button) {
        button.addEventListener('click', function () {
          buttons.forEach(function (other) {
            other.setAttribute('aria-selected', other === button ? 'true' : 'false');
            var panel = document.getElementById(other.getAttribute('aria-controls'));
            if (panel) panel.hidden = other !== button;
          });
        });
      });
    });
  }

  function animateCounter(el) {
    var target = parseFloat(el.getAttribute('data-target')) || 0;
    var duration = parseInt(el.getAttribute('data-duration'), 10) || 2000;
    var decimals = parseInt(el.getAttribute('data-decimals'), 10) || 0;
    var start = null;
    function step(now) {
      if (start === null) start = now;
      var progress = Math.min((now - start) / duration, 1);
      var eased = 1 - Math.pow(1 - progress, 3);
      el.textContent = (target * eased).toFixed(decimals);
      if (progress < 1) requestAnimationFrame(step);
    }
    requestAnimationFrame(step);
  }

  function initCounters() {
    var counters = document.querySelectorAll('.counter-number[data-target]');
    if (!counters.length) return;
    if (!('IntersectionObserver' in window)) return;
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (!entry.isIntersecting) return;
        observer.unobserve(entry.target);
        animateCounter(entry.target);
      });
    }, { threshold: 0.4 });
    counters.forEach(function (counter) {
      counter.textContent = '0';
      observer.observe(counter);
    });
  }

  function initCountdowns() {
    document.querySelectorAll('.el-countdown[data-target]').forEach(function (el) {
      var target = new Date(el.getAttribute('data-target')).getTime();
      if (isNaN(target)) return;
      var units = {};
      el.querySelectorAll('[data-unit]').forEach(function (span) {
        units[span.getAttribute('data-unit')] = span;
      });
      function pad(n) { return n < 10 ? '0' + n : String(n); }
      function tick() {
        var left = target - Date.now();
        if (left <= 0) {
          var box = el.querySelector('.countdown-units');
          if (box) box.textContent = el.getAttribute('data-expired') || '';
          clearInterval(timer);
          return;
        }
        var s = Math.floor(left / 1000);
        if (units.days) units.days.textContent = Math.floor(s / 86400);
        if (units.hours) units.hours.textContent = pad(Math.floor(s % 86400 / 3600));
        if (units.minutes) units.minutes.textContent = pad(Math.floor(s % 3600 / 60));
        if (units.seconds) units.seconds.textContent = pad(s % 60);
      }
      var timer = setInterval(tick, 1000);
      tick();
    });
  }

  var SHARE_URLS = {
    facebook: function (u) { return 'https://www.facebook.com/sharer/sharer.php?u=' + u; },
    twitter: function (u, t) { return 'https://twitter.com/intent/tweet?url=' + u + '&text=' + t; },
    linkedin: function (u) { return 'https://www.linkedin.com/sharing/share-offsite/?url=' + u; },
    whatsapp: function (u, t) { return 'https://wa.me/?text=' + (t ? t + '%20' : '') + u; },
    email: function (u, t) { return 'mailto:?subject=' + t + '&body=' + u; },
    pinterest: function (u, t) { return 'https://pinterest.com/pin/create/button/?url=' + u + '&description=' + t; }
  };

  function initShareButtons() {
    document.querySelectorAll('.el-share').forEach(function (group) {
      var text = encodeURIComponent(group.getAttribute('data-share-text') || document.title);
      var url = encodeURIComponent(window.location.href);
      group.querySelectorAll('a[data-share]').forEach(function (link) {
        if (link.getAttribute('href') !== '#') return;
        var build = SHARE_URLS[link.getAttribute('data-share')];
        if (build) link.setAttribute('href', build(url, text));
      });
    });
  }

  function initQrCodes() {
    var canvases = document.querySelectorAll('canvas[data-qr-value]');
    if (!canvases.length || !window.QRCode || !window.QRCode.toCanvas) return;
    canvases.forEach(function (canvas) {
      window.QRCode.toCanvas(canvas, canvas.getAttribute('data-qr-value'), {
        width: parseInt(canvas.getAttribute('data-qr-size'), 10) || 160,
        margin: 1,
        color: {
          dark: canvas.getAttribute('data-qr-dark') || '#000000',
          light: canvas.getAttribute('data-qr-light') || '#ffffff'
        }
      }, function (error) {
        if (error && window.console) console.warn('QR code failed', error);
      });
    });
  }

  function initChat() {
    var bubble = document.querySelector('.chat-bubble');
    var panel = document.getElementById('chat-panel');
    if (!bubble || !panel) return;
    bubble.addEventListener('click', function () {
      panel.hidden = !panel.hidden;
      bubble.setAttribute('aria-expanded', panel.hidden ? 'false' : 'true');
    });
  }

  function initMailtoForms() {
    document.querySelectorAll('form[data-mailto]').forEach(function (form) {
      form.addEventListener('submit', function (event) {
        event.preventDefault();
        var lines = [];
        Array.prototype.forEach.call(form.elements, function (field) {
          if (!field.name || field.type === 'submit' || field.type === 'hidden') return;
          var label = form.querySelector('label[for="' + field.id + '"]');
          lines.push((label ? label.textContent : field.name) + ': ' + field.value);
        });
        var subject = encodeURIComponent('Message from ' + document.title);
        var body = encodeURIComponent(lines.join('\n'));
        window.location.href = 'mailto:' + form.getAttribute('data-mailto') + '?subject=' + subject + '&body=' + body;
        setTimeout(function () { window.location.href = form.getAttribute('action') || 'merci.html'; }, 800);
      });
    });
  }

  ready(function () {
    initNav();
    initSmoothScroll();
    initAccordions();
    initTabs();
    initCounters();
    initCountdowns();
    initShareButtons();
    initQrCodes();
    initChat();
    initMailtoForms();
  });
})();
"##;

/// `assets/js/app.js`: progressive enhancement for every exported page.
pub fn generate_app_js(site: &SiteData) -> String {
    format!(
        "var STICKY_HEADER = {};\n{}",
        site.header.sticky, APP_JS
    )
}
