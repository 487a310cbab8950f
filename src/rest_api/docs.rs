//! Static documentation page served at `/`

pub const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Lightsaber API</title>
</head>
<body>
  <h1>Lightsaber API</h1>
  <p>JSON over HTTP. Every response is wrapped as
     <code>{ success, data?, message?, error? }</code>.</p>
  <table>
    <thead><tr><th>Method</th><th>Path</th><th>Description</th></tr></thead>
    <tbody>
      <tr><td>GET</td><td>/api/lightsabers</td><td>List lightsabers. Filters: <code>color</code>, <code>creator</code>, <code>active</code></td></tr>
      <tr><td>GET</td><td>/api/lightsabers/:id</td><td>Fetch one lightsaber</td></tr>
      <tr><td>POST</td><td>/api/lightsabers</td><td>Create a lightsaber</td></tr>
      <tr><td>PUT</td><td>/api/lightsabers/:id</td><td>Replace every mutable field</td></tr>
      <tr><td>PATCH</td><td>/api/lightsabers/:id</td><td>Update only the supplied fields</td></tr>
      <tr><td>DELETE</td><td>/api/lightsabers/:id</td><td>Delete a lightsaber</td></tr>
      <tr><td>GET</td><td>/health</td><td>Liveness probe</td></tr>
    </tbody>
  </table>
  <h2>Fields</h2>
  <ul>
    <li><code>name</code>, <code>creator</code>: 1 to 100 characters</li>
    <li><code>color</code>: blue, green, red, purple, yellow, orange, white, black, silver</li>
    <li><code>crystalType</code>: Kyber, Synthetic, Adegan, Ilum, Hurrikaine, Krayt Dragon Pearl, Solari, Mantle of the Force</li>
    <li><code>hiltMaterial</code>: Durasteel, Phrik, Cortosis, Beskar, Electrum, Chromium, Bronzium, Aurodium</li>
    <li><code>isActive</code>: boolean, defaults to true</li>
  </ul>
</body>
</html>
"#;
